//! Launch form view-model

use tracing::debug;

use crate::{
    core::{FieldErrors, FormInput, LaunchError, LaunchReceipt, SubmissionStatus, SubmissionStep},
    sequencer::Launchpad,
};

/// Form state: field values, inline errors, status banner and the submit
/// control's enabled state
#[derive(Debug, Default)]
pub struct LaunchForm {
    input: FormInput,
    errors: FieldErrors,
    status: SubmissionStatus,
    step: SubmissionStep,
    in_flight: bool,
}

impl LaunchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with `input`
    pub fn with_input(input: FormInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn set_token_name(&mut self, value: impl Into<String>) {
        self.input.token_name = value.into();
    }

    pub fn set_token_symbol(&mut self, value: impl Into<String>) {
        self.input.token_symbol = value.into();
    }

    pub fn set_image_url(&mut self, value: impl Into<String>) {
        self.input.image_url = value.into();
    }

    pub fn set_initial_supply(&mut self, value: impl Into<String>) {
        self.input.initial_supply = value.into();
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn step(&self) -> &SubmissionStep {
        &self.step
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.in_flight
    }

    /// Submit the current input through `launchpad`.
    ///
    /// Ignored while a submission is in flight. Validation failures populate
    /// `errors()` and leave the status idle; every other failure ends in an
    /// `Error` status with a classified message. Control returns to idle
    /// either way.
    pub async fn submit(&mut self, launchpad: &Launchpad) -> Option<LaunchReceipt> {
        self.submit_with(launchpad, |_| {}).await
    }

    /// `submit`, reporting every status change to `on_status` as it happens:
    /// one `Progress` per step, then the final status.
    pub async fn submit_with<F>(
        &mut self,
        launchpad: &Launchpad,
        mut on_status: F,
    ) -> Option<LaunchReceipt>
    where
        F: FnMut(&SubmissionStatus),
    {
        if self.in_flight {
            debug!("submission already in flight, ignoring submit");
            return None;
        }
        self.in_flight = true;

        let input = self.input.clone();
        let status = &mut self.status;
        let errors = &mut self.errors;
        let current = &mut self.step;
        let outcome = launchpad
            .run(&input, |step| {
                if *step == SubmissionStep::AwaitingWalletConnection {
                    // Validation passed
                    errors.clear();
                }
                if let Some(message) = step.progress_message() {
                    *status = SubmissionStatus::Progress(message.to_string());
                    on_status(&*status);
                }
                *current = step.clone();
            })
            .await;

        self.in_flight = false;
        self.step = SubmissionStep::Idle;

        let receipt = match outcome {
            Ok(receipt) => {
                self.errors.clear();
                self.status = SubmissionStatus::Success {
                    mint: receipt.mint,
                    message: format!("Token launched successfully! Mint address: {}", receipt.mint),
                };
                Some(receipt)
            }
            Err(LaunchError::Validation(errors)) => {
                self.errors = errors;
                self.status = SubmissionStatus::Idle;
                None
            }
            Err(err) => {
                self.status = SubmissionStatus::Error(err.user_message());
                None
            }
        };
        on_status(&self.status);
        receipt
    }
}
