//! Command pipeline: an ordered list of stages wrapped around a single handler.
//!
//! Stages run outermost-first in the order they were added. Each stage receives the
//! command together with a [`Next`] continuation and either short-circuits with a
//! [`Failure`] or passes the command on.

use async_trait::async_trait;
use starkeeper_core::{CommandResult, Failure};

use crate::validation::Validator;

#[async_trait]
pub trait CommandHandler<C, T>: Send + Sync
where
    C: Send + 'static,
    T: Send + 'static,
{
    async fn handle(&self, command: C) -> CommandResult<T>;
}

#[async_trait]
pub trait PipelineStage<C, T>: Send + Sync
where
    C: Send + 'static,
    T: Send + 'static,
{
    async fn process(&self, command: C, next: Next<'_, C, T>) -> CommandResult<T>;
}

/// The remainder of the pipeline after the current stage.
pub struct Next<'a, C, T> {
    stages: &'a [Box<dyn PipelineStage<C, T>>],
    handler: &'a dyn CommandHandler<C, T>,
}

impl<'a, C, T> Next<'a, C, T>
where
    C: Send + 'static,
    T: Send + 'static,
{
    pub async fn run(self, command: C) -> CommandResult<T> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                let next = Next {
                    stages: rest,
                    handler: self.handler,
                };
                stage.process(command, next).await
            }
            None => self.handler.handle(command).await,
        }
    }
}

pub struct Pipeline<C, T> {
    stages: Vec<Box<dyn PipelineStage<C, T>>>,
    handler: Box<dyn CommandHandler<C, T>>,
}

impl<C, T> Pipeline<C, T>
where
    C: Send + 'static,
    T: Send + 'static,
{
    pub fn new(handler: impl CommandHandler<C, T> + 'static) -> Self {
        Self {
            stages: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Appends a stage inside the ones already added.
    pub fn with_stage(mut self, stage: impl PipelineStage<C, T> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    #[tracing::instrument(name = "Pipeline::dispatch", skip_all)]
    pub async fn dispatch(&self, command: C) -> CommandResult<T> {
        Next {
            stages: &self.stages,
            handler: self.handler.as_ref(),
        }
        .run(command)
        .await
    }
}

/// Rejects commands that fail validation before they reach the handler.
pub struct ValidationStage<C> {
    validator: Validator<C>,
}

impl<C> ValidationStage<C> {
    pub fn new(validator: Validator<C>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl<C, T> PipelineStage<C, T> for ValidationStage<C>
where
    C: Send + Sync + 'static,
    T: Send + 'static,
{
    async fn process(&self, command: C, next: Next<'_, C, T>) -> CommandResult<T> {
        let failures = self.validator.validate(&command).await;

        let rejected = failures.iter().map(|f| f.field).collect::<Vec<_>>();
        if let Some(failure) = Failure::distinct(failures.into_iter().map(|f| f.message)) {
            tracing::debug!(fields = ?rejected, "Command rejected at validation");
            return Err(failure);
        }

        next.run(command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleChain;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct Echo(String);

    fn text(command: &Echo) -> &str {
        &command.0
    }

    #[derive(Clone, Default)]
    struct Journal(Arc<Mutex<Vec<String>>>);

    impl Journal {
        fn push(&self, entry: &str) {
            self.0.lock().unwrap().push(entry.to_string());
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct EchoHandler(Journal);

    #[async_trait]
    impl CommandHandler<Echo, String> for EchoHandler {
        async fn handle(&self, command: Echo) -> CommandResult<String> {
            self.0.push("handler");
            Ok(command.0)
        }
    }

    struct Recording(&'static str, Journal);

    #[async_trait]
    impl PipelineStage<Echo, String> for Recording {
        async fn process(
            &self,
            command: Echo,
            next: Next<'_, Echo, String>,
        ) -> CommandResult<String> {
            self.1.push(&format!("{} before", self.0));
            let result = next.run(command).await;
            self.1.push(&format!("{} after", self.0));
            result
        }
    }

    struct Refuse;

    #[async_trait]
    impl PipelineStage<Echo, String> for Refuse {
        async fn process(
            &self,
            _command: Echo,
            _next: Next<'_, Echo, String>,
        ) -> CommandResult<String> {
            Err(Failure::new("refused"))
        }
    }

    fn non_empty_validator() -> Validator<Echo> {
        Validator::new().rule(
            RuleChain::for_field("Text", text)
                .not_empty()
                .min_length(3)
                .with_message("too short"),
        )
    }

    #[tokio::test]
    async fn test_handler_result_is_returned_verbatim() {
        let journal = Journal::default();
        let pipeline = Pipeline::new(EchoHandler(journal.clone()));

        let result = pipeline.dispatch(Echo("hello".to_string())).await;

        assert_eq!(result, Ok("hello".to_string()));
        assert_eq!(journal.entries(), ["handler"]);
    }

    #[tokio::test]
    async fn test_stages_run_in_declared_order_around_handler() {
        let journal = Journal::default();
        let pipeline = Pipeline::new(EchoHandler(journal.clone()))
            .with_stage(Recording("outer", journal.clone()))
            .with_stage(Recording("inner", journal.clone()));

        pipeline.dispatch(Echo("hello".to_string())).await.unwrap();

        assert_eq!(
            journal.entries(),
            ["outer before", "inner before", "handler", "inner after", "outer after"]
        );
    }

    #[tokio::test]
    async fn test_short_circuiting_stage_prevents_handler() {
        let journal = Journal::default();
        let pipeline = Pipeline::new(EchoHandler(journal.clone()))
            .with_stage(Refuse)
            .with_stage(Recording("inner", journal.clone()));

        let result = pipeline.dispatch(Echo("hello".to_string())).await;

        assert_eq!(result, Err(Failure::new("refused")));
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_returns_distinct_messages_and_skips_handler() {
        let journal = Journal::default();
        let pipeline = Pipeline::new(EchoHandler(journal.clone()))
            .with_stage(ValidationStage::new(non_empty_validator()));

        let result = pipeline.dispatch(Echo(String::new())).await;

        assert_eq!(result.unwrap_err().messages(), ["too short"]);
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_valid_command_passes_validation_stage() {
        let journal = Journal::default();
        let pipeline = Pipeline::new(EchoHandler(journal.clone()))
            .with_stage(ValidationStage::new(non_empty_validator()));

        let result = pipeline.dispatch(Echo("long enough".to_string())).await;

        assert_eq!(result, Ok("long enough".to_string()));
    }
}
