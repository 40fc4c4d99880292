//! Progress reporting for a pipeline run.

/// A pipeline step, reported as it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Writing the uploaded template to a temporary file and loading it
    LoadingTemplate,
    /// Running the structure analyzer and content extractor
    AnalyzingStructure,
    /// Extracting text from the photo reports
    ExtractingReports {
        /// Number of reports
        count: usize,
    },
    /// First completion call: structure analysis
    LearningStructure,
    /// Second completion call: filled report
    GeneratingReport,
    /// Populating and serializing the output document
    CreatingDocument,
    /// Finished successfully
    Complete,
}

impl Stage {
    /// Overall progress when this stage starts, in percent.
    pub fn percent(&self) -> u8 {
        match self {
            Stage::LoadingTemplate => 10,
            Stage::AnalyzingStructure => 15,
            Stage::ExtractingReports { .. } => 35,
            Stage::LearningStructure => 50,
            Stage::GeneratingReport => 65,
            Stage::CreatingDocument => 90,
            Stage::Complete => 100,
        }
    }

    /// Human-readable status line.
    pub fn message(&self) -> String {
        match self {
            Stage::LoadingTemplate => "Loading template...".to_string(),
            Stage::AnalyzingStructure => "Analyzing template structure...".to_string(),
            Stage::ExtractingReports { count } => {
                format!("Extracting from {} report(s)...", count)
            }
            Stage::LearningStructure => "AI learning template structure...".to_string(),
            Stage::GeneratingReport => "Generating completed report with AI...".to_string(),
            Stage::CreatingDocument => "Creating document...".to_string(),
            Stage::Complete => "Complete!".to_string(),
        }
    }
}

/// Receives stage changes and recoverable problems during a run.
pub trait PipelineObserver {
    /// A stage has started.
    fn on_stage(&self, _stage: &Stage) {}

    /// Something failed but the run continues with degraded input.
    fn on_warning(&self, _message: &str) {}
}

/// Observer that forwards everything to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_stage(&self, stage: &Stage) {
        log::info!("[{:>3}%] {}", stage.percent(), stage.message());
    }

    fn on_warning(&self, message: &str) {
        log::warn!("{}", message);
    }
}
