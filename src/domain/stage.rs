use serde::Serialize;

use crate::models::enums::ApplicationStatus;

/// Display decoration for an application's status: the stage label, a
/// progress percentage and an optional hint about what happens next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub stage: &'static str,
    pub progress: u8,
    pub next_step: Option<&'static str>,
}

impl StageInfo {
    /// Sentinel for status codes outside the known set. Codes from newer
    /// schema revisions decorate as an unknown stage instead of failing.
    pub const UNKNOWN: StageInfo = StageInfo {
        stage: "Unknown Stage",
        progress: 0,
        next_step: None,
    };
}

pub fn application_stage(status: ApplicationStatus) -> StageInfo {
    match status {
        ApplicationStatus::Applied => StageInfo {
            stage: "Application Submitted",
            progress: 25,
            next_step: Some("Application under review"),
        },
        ApplicationStatus::Reviewed => StageInfo {
            stage: "Application Review",
            progress: 50,
            next_step: Some("Waiting for hiring manager feedback"),
        },
        ApplicationStatus::Interview => StageInfo {
            stage: "Interview Stage",
            progress: 75,
            next_step: Some("Prepare for your interview"),
        },
        ApplicationStatus::Rejected => StageInfo {
            stage: "Application Rejected",
            progress: 25,
            next_step: None,
        },
        ApplicationStatus::Accepted => StageInfo {
            stage: "Offer Accepted",
            progress: 100,
            next_step: None,
        },
    }
}

/// Decorate a raw status string, falling back to the sentinel when the code
/// is not one we know.
pub fn application_stage_of(raw: &str) -> StageInfo {
    ApplicationStatus::parse(raw)
        .map(application_stage)
        .unwrap_or(StageInfo::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_follows_the_status_table() {
        let expected = [
            (ApplicationStatus::Applied, 25),
            (ApplicationStatus::Reviewed, 50),
            (ApplicationStatus::Interview, 75),
            (ApplicationStatus::Rejected, 25),
            (ApplicationStatus::Accepted, 100),
        ];
        for (status, progress) in expected {
            assert_eq!(application_stage(status).progress, progress);
        }
    }

    #[test]
    fn unknown_codes_decorate_as_the_sentinel() {
        let info = application_stage_of("ghosted");
        assert_eq!(info, StageInfo::UNKNOWN);
        assert_eq!(info.progress, 0);
        assert_eq!(info.stage, "Unknown Stage");
    }

    #[test]
    fn legacy_pending_spelling_decorates_as_applied() {
        assert_eq!(
            application_stage_of("pending"),
            application_stage(ApplicationStatus::Applied)
        );
    }

    #[test]
    fn terminal_states_have_no_next_step() {
        assert!(application_stage(ApplicationStatus::Rejected).next_step.is_none());
        assert!(application_stage(ApplicationStatus::Accepted).next_step.is_none());
    }
}
