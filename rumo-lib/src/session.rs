use tracing::debug;

use crate::{
    config::Cfg,
    controller::{Controller, Effect, Message, Notice},
    sync::Backend,
};

/// Drives a [`Controller`] against a [`Backend`], carrying out the effects it asks for.
pub struct Session<B: Backend> {
    controller: Controller,
    backend: B,
}

impl<B: Backend> Session<B> {
    pub fn new(cfg: Cfg, backend: B) -> Self {
        Self {
            controller: Controller::new(cfg),
            backend,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.controller.take_notices()
    }

    /// Feed `message` to the controller and run effects until it settles.
    pub async fn dispatch(&mut self, message: Message) {
        let mut effect = self.controller.update(message);

        while let Some(outcome) = self.perform(effect).await {
            effect = self.controller.update(outcome);
        }
    }

    /// Run one effect, returning the message that reports its outcome.
    pub async fn perform(&self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::None => None,
            Effect::FetchOpen(ticket) => {
                debug!("Fetching open entries for view {ticket}");
                let result = self.backend.list_open().await;
                Some(Message::OpenLoaded { ticket, result })
            }
            Effect::Submit(ticket, submission) => {
                debug!("Submitting entry for view {ticket}");
                let result = self.backend.submit(&submission).await;
                Some(Message::Submitted {
                    ticket,
                    operation: submission.operation,
                    free_revenue: submission.free_revenue,
                    result,
                })
            }
        }
    }
}
