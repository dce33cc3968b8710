use std::path::{Path, PathBuf};

use kagami_ipc::{Event, WmInfo};

use crate::error::Result;
use crate::ipc::{self, EventStream};
use crate::state::WmState;

const DUMP_COMMAND: &[&str] = &["wm", "-d"];
const SUBSCRIBE_TOPICS: &[&str] = &["monitor", "desktop"];

type EventHook = Box<dyn FnMut(&str, &WmState) + Send>;

/// A bspwm client holding a live mirror of the daemon's state.
///
/// Usage is two sequential phases on one logical stream of control:
/// [`bootstrap`](Wm::bootstrap) pulls a full state dump, then
/// [`run`](Wm::run) subscribes and applies events until the daemon goes
/// away. `run` takes `&mut self`, which makes the subscription loop the
/// mirror's sole writer; wrap the whole `Wm` in a reader-writer lock if
/// other threads need to read the mirror while it runs.
///
/// There is no reconnection logic anywhere in here. A lost connection
/// surfaces as an error and retrying (including rediscovering the socket
/// path) is the caller's call.
pub struct Wm {
    socket_path: PathBuf,
    state: Option<WmState>,
    hook: Option<EventHook>,
}

impl Wm {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            state: None,
            hook: None,
        }
    }

    /// Register an observation hook, called with the raw line and the
    /// post-mutation mirror after each event line has been applied,
    /// including lines with event types this client ignores.
    pub fn on_event(mut self, hook: impl FnMut(&str, &WmState) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// The mirror; `None` until the first successful bootstrap.
    pub fn state(&self) -> Option<&WmState> {
        self.state.as_ref()
    }

    /// Fetch a full state dump and replace the mirror wholesale.
    pub async fn bootstrap(&mut self) -> Result<()> {
        let reply = ipc::request(&self.socket_path, DUMP_COMMAND).await?;
        let info = WmInfo::parse(&reply)?;
        let state = WmState::from_info(info)?;
        tracing::info!(
            "mirrored {} monitors, focused on {}",
            state.monitors.len(),
            state.focused().map(|m| m.name.as_str()).unwrap_or("?")
        );
        self.state = Some(state);
        Ok(())
    }

    /// Subscribe and apply events until the daemon closes the stream
    /// (returns `Ok`) or a failure propagates: connection errors, and
    /// events referencing ids the mirror does not hold, are fatal. A line
    /// that merely fails to parse is logged and skipped; one malformed
    /// line must not kill the subscription.
    ///
    /// Cancellation is cooperative: drop the future (e.g. the losing arm
    /// of a `select!`) and the subscription socket closes with it.
    ///
    /// # Panics
    ///
    /// Panics if called before a successful [`bootstrap`](Wm::bootstrap);
    /// dispatching events into an empty mirror is a programming error.
    pub async fn run(&mut self) -> Result<()> {
        assert!(
            self.state.is_some(),
            "Wm::run called before Wm::bootstrap"
        );

        let mut events = EventStream::open(&self.socket_path, SUBSCRIBE_TOPICS).await?;
        while let Some(line) = events.next_line().await? {
            self.dispatch(&line).await?;
        }
        tracing::info!("bspwm closed the event stream");
        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> Result<()> {
        match Event::parse(line) {
            Ok(Event::MonitorGeometry) => {
                // Monitor topology may have changed; re-derive the whole
                // tree rather than patch it incrementally.
                tracing::info!("monitor geometry changed, re-reading full state");
                self.bootstrap().await?;
            }
            Ok(Event::Unknown(_)) => {
                tracing::debug!("ignoring unhandled event {:?}", line);
            }
            Ok(event) => {
                let state = self.state.as_mut().expect("mirror present after bootstrap");
                state.apply(&event)?;
            }
            Err(e) => {
                tracing::warn!("skipping malformed event line {:?}: {}", line, e);
                return Ok(());
            }
        }

        if let Some(hook) = self.hook.as_mut() {
            if let Some(state) = self.state.as_ref() {
                hook(line, state);
            }
        }
        Ok(())
    }
}
