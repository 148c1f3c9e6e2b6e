use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{Tick, WallController, WallEvent};
use crate::player::MediaPlayer;
use crate::status::StatusSource;
use crate::surface::WallSurface;

pub type EventSender = mpsc::UnboundedSender<WallEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<WallEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub fn spawn_fetch(source: Arc<dyn StatusSource>, events: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.fetch().await;
        if events.send(WallEvent::PollCompleted(result)).is_err() {
            debug!("status result dropped, runtime gone");
        }
    })
}

pub struct WallRuntime<S: WallSurface, P: MediaPlayer> {
    controller: WallController<S, P>,
    source: Arc<dyn StatusSource>,
    events_tx: EventSender,
    events_rx: EventReceiver,
}

impl<S: WallSurface, P: MediaPlayer> WallRuntime<S, P> {
    pub fn new(
        controller: WallController<S, P>,
        source: Arc<dyn StatusSource>,
        events_tx: EventSender,
        events_rx: EventReceiver,
    ) -> Self {
        Self {
            controller,
            source,
            events_tx,
            events_rx,
        }
    }

    pub fn controller(&self) -> &WallController<S, P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut WallController<S, P> {
        &mut self.controller
    }

    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    pub fn step(&mut self, now: Instant) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.controller.handle(event, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel closed");
                    break;
                }
            }
        }
        self.fire_due(now);
    }

    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.fire_due(Instant::now());

            let deadline = self.controller.next_deadline();
            let wake = async move {
                match deadline {
                    Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = &mut shutdown => break,
                event = self.events_rx.recv() => match event {
                    Some(event) => self.controller.handle(event, Instant::now()),
                    None => {
                        warn!("event channel closed, stopping");
                        break;
                    }
                },
                _ = wake => {}
            }
        }
    }

    pub fn into_controller(self) -> WallController<S, P> {
        self.controller
    }

    fn fire_due(&mut self, now: Instant) {
        if self.controller.advance(now) == Tick::FetchStatus {
            spawn_fetch(self.source.clone(), self.events_tx.clone());
        }
    }
}
