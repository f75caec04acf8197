use crate::core::buffer::CodeBuffer;
use crate::domain::ports::ReviewService;
use crate::utils::error::{FailureKind, ReviewFailure};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub const WELCOME_PLACEHOLDER: &str = "# Code Review\n\nPaste your code on the left and press **Ctrl+Enter** (or click **Review**) to get feedback.";
pub const WORKING_PLACEHOLDER: &str = "Analyzing your code...";

pub type ReviewResult = std::result::Result<String, ReviewFailure>;

/// Why a submit did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Busy,
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Skipped(SkipReason),
    Reviewed,
    Failed(FailureKind),
}

/// Owns the editor text, the review pane text and the busy flag.
///
/// A submission runs in two steps: [`begin`](Self::begin) checks the guards,
/// raises the busy flag and shows the working placeholder;
/// [`settle`](Self::settle) stores the outcome and always lowers the flag.
/// At most one request is outstanding: while busy, further submits are
/// ignored rather than queued or cancelling the running one.
pub struct ReviewController<S: ReviewService + ?Sized> {
    service: Arc<S>,
    input: CodeBuffer,
    output: String,
    busy: bool,
    revision: u64,
}

impl<S: ReviewService + ?Sized + 'static> ReviewController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            input: CodeBuffer::new(),
            output: WELCOME_PLACEHOLDER.to_string(),
            busy: false,
            revision: 0,
        }
    }

    pub fn input(&self) -> &CodeBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut CodeBuffer {
        &mut self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Bumped on every change of the review output.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_submit(&self) -> bool {
        !self.busy && !self.input.is_blank()
    }

    pub fn begin(&mut self) -> std::result::Result<String, SkipReason> {
        if self.busy {
            tracing::debug!("Submit ignored: a review is already in flight");
            return Err(SkipReason::Busy);
        }
        if self.input.is_blank() {
            tracing::debug!("Submit ignored: input is empty");
            return Err(SkipReason::EmptyInput);
        }

        self.busy = true;
        self.set_output(WORKING_PLACEHOLDER.to_string());
        tracing::info!("Requesting review for {} lines of code", self.input.line_count());
        Ok(self.input.text().to_string())
    }

    pub fn settle(&mut self, result: ReviewResult) -> SubmitOutcome {
        self.busy = false;
        match result {
            Ok(review) => {
                tracing::info!("Review received ({} bytes)", review.len());
                self.set_output(review);
                SubmitOutcome::Reviewed
            }
            Err(failure) => {
                tracing::warn!("Review failed: {} (kind: {:?})", failure, failure.kind());
                let kind = failure.kind();
                self.set_output(failure.to_markdown());
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Runs one full submission and waits for it to settle.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let code = match self.begin() {
            Ok(code) => code,
            Err(reason) => return SubmitOutcome::Skipped(reason),
        };
        let result = self.service.review(&code).await;
        self.settle(result)
    }

    /// Starts a submission on the runtime and sends its result to `tx`. The
    /// caller feeds the result back through [`settle`](Self::settle).
    pub fn spawn_submit(
        &mut self,
        tx: UnboundedSender<ReviewResult>,
    ) -> std::result::Result<(), SkipReason> {
        let code = self.begin()?;
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let result = service.review(&code).await;
            if tx.send(result).is_err() {
                tracing::debug!("Review finished after the UI closed");
            }
        });
        Ok(())
    }

    fn set_output(&mut self, output: String) {
        self.output = output;
        self.revision += 1;
    }
}
