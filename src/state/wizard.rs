#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use crate::capture::CapturedImage;

/// One step of the attendance wizard: Capture (0) -> Verify (1) -> Results (2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Capture,
    Verify,
    Results,
}

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            Self::Capture => 0,
            Self::Verify => 1,
            Self::Results => 2,
        }
    }
}

/// A recognition (or manual) result row shown on the Results step.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionRow {
    pub student_id: String,
    pub class_id: String,
    pub recognized: bool,
    /// Match similarity in 0..=1; zero for manual entries.
    pub similarity: f64,
    pub image_url: Option<String>,
    /// True when the row came from the manual-entry fallback rather than
    /// the face-recognition call.
    pub manual: bool,
}

/// Attendance wizard state machine.
///
/// All transitions are synchronous and guarded by their preconditions; the
/// fields here are the only coordination between the capture card, the class
/// selector, and the submission call. Async completions (file reads, the
/// recognition response) must pass the `generation` they observed at launch
/// so a result that lands after "start over" is dropped instead of being
/// applied to a superseded wizard.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub image: Option<CapturedImage>,
    pub class_id: Option<String>,
    pub rows: Vec<RecognitionRow>,
    pub submitted: bool,
    pub submitting: bool,
    generation: u64,
}

/// Validation message shown when Verify -> Results is attempted without
/// both an image and a class.
pub const MISSING_INPUT: &str = "Please capture or upload an image and select a class";

impl WizardState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// An image became available (camera frame or file). Moves to Verify and
    /// clears any previously selected class.
    pub fn image_ready(&mut self, image: CapturedImage) {
        self.image = Some(image);
        self.class_id = None;
        self.step = WizardStep::Verify;
    }

    /// Generation-checked variant for async image sources. Returns false and
    /// leaves the state untouched when the wizard was reset meanwhile.
    pub fn image_ready_if_current(&mut self, generation: u64, image: CapturedImage) -> bool {
        if generation != self.generation {
            return false;
        }
        self.image_ready(image);
        true
    }

    /// "Retake" — discard the captured image and return to Capture. The
    /// caller is responsible for releasing the camera controller.
    pub fn retake(&mut self) {
        self.image = None;
        self.step = WizardStep::Capture;
    }

    /// Check the Verify -> Results precondition without mutating anything.
    pub fn ready_to_submit(&self) -> Result<(), &'static str> {
        if self.image.is_none() || self.class_id.is_none() {
            return Err(MISSING_INPUT);
        }
        Ok(())
    }

    /// Begin the submission call. Rejected (no state change) when image or
    /// class is missing; on accept, marks the wizard in-flight and returns
    /// the generation to hand to the async completion.
    pub fn begin_submit(&mut self) -> Result<u64, &'static str> {
        self.ready_to_submit()?;
        self.submitting = true;
        Ok(self.generation)
    }

    /// Apply a submission outcome. Ignored (returns false) when the wizard
    /// was reset after the request was issued.
    pub fn apply_outcome(&mut self, generation: u64, row: RecognitionRow) -> bool {
        if generation != self.generation {
            return false;
        }
        self.rows = vec![row];
        self.submitting = false;
        self.submitted = true;
        self.step = WizardStep::Results;
        true
    }

    /// A submission failed hard; clear the in-flight flag so the user can
    /// re-initiate, but stay on the current step.
    pub fn fail_submit(&mut self, generation: u64) {
        if generation == self.generation {
            self.submitting = false;
        }
    }

    /// True once a submission came back with a positive recognition. The
    /// student check-in shows its success view on this and nothing else:
    /// a soft failure (`recognized: false`) or a manual row never counts.
    pub fn recognition_succeeded(&self) -> bool {
        self.submitted && self.rows.iter().any(|r| r.recognized && !r.manual)
    }

    /// Record a manual-entry row without touching the capture state.
    pub fn record_manual(&mut self, student_id: String, class_id: String) {
        self.rows.push(RecognitionRow {
            student_id,
            class_id,
            recognized: true,
            similarity: 0.0,
            image_url: None,
            manual: true,
        });
    }

    /// "Start over" — unconditionally clear image, class, results, and flags,
    /// and invalidate every outstanding async completion.
    pub fn start_over(&mut self) {
        self.image = None;
        self.class_id = None;
        self.rows.clear();
        self.submitted = false;
        self.submitting = false;
        self.step = WizardStep::Capture;
        self.generation += 1;
    }
}
