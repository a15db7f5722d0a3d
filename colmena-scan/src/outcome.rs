use colmena_model::{AccessCheckResponse, CheckinResponse, messages};

/// Placeholder shown where the backend sent no usable value.
const PLACEHOLDER: &str = "—";

/// Visual register of a resolved scan, for the acknowledgment dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// Why a scan was rejected, mapped from the backend's message code.
///
/// Unknown codes land in `Other`; the raw message is always carried
/// alongside so nothing is lost in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    AlreadyUsed,
    NotFound,
    EventNotActive,
    CodeDisabled,
    Other,
}

impl RejectionReason {
    fn from_checkin_message(message: &str) -> Self {
        match message {
            messages::ALREADY_USED => RejectionReason::AlreadyUsed,
            messages::NOT_FOUND => RejectionReason::NotFound,
            _ => RejectionReason::Other,
        }
    }

    fn from_access_message(message: &str) -> Self {
        match message {
            messages::EVENT_NOT_ACTIVE => RejectionReason::EventNotActive,
            messages::CODE_DISABLED => RejectionReason::CodeDisabled,
            messages::NOT_FOUND => RejectionReason::NotFound,
            _ => RejectionReason::Other,
        }
    }
}

/// The resolved result of one accepted scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Reservation check-in accepted: admit the person.
    CheckinApproved {
        full_name: String,
        code: String,
        message: String,
    },
    /// Reservation check-in rejected.
    CheckinRejected {
        code: String,
        reason: RejectionReason,
        message: String,
    },
    /// Access code accepted: welcome, counter already incremented.
    AccessGranted {
        event_name: String,
        event_status: String,
        scan_count: i64,
        code: String,
    },
    /// Access code rejected; the event name is included when the backend
    /// resolved the code far enough to know it.
    AccessRejected {
        code: String,
        reason: RejectionReason,
        message: String,
        event_name: Option<String>,
    },
    /// The validation call itself failed (transport or unclassified error).
    Failure { message: String },
}

impl ScanOutcome {
    /// Classify a check-in response.
    pub fn from_checkin(code: &str, response: CheckinResponse) -> Self {
        if response.ok {
            let full_name = response
                .reservation
                .as_ref()
                .map(|r| r.full_name())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            ScanOutcome::CheckinApproved {
                full_name,
                code: code.to_string(),
                message: non_empty_or(response.message, messages::OK),
            }
        } else {
            let message = non_empty_or(response.message, "REJECTED");
            ScanOutcome::CheckinRejected {
                code: code.to_string(),
                reason: RejectionReason::from_checkin_message(&message),
                message,
            }
        }
    }

    /// Classify an access-check response.
    pub fn from_access_check(code: &str, response: AccessCheckResponse) -> Self {
        if response.ok {
            let event_name = response
                .event
                .as_ref()
                .map(|e| e.name.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let event_status = response
                .event
                .as_ref()
                .map(|e| e.status.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let scan_count = response.access.as_ref().map(|a| a.scan_count).unwrap_or(0);
            ScanOutcome::AccessGranted {
                event_name,
                event_status,
                scan_count,
                code: code.to_string(),
            }
        } else {
            let message = non_empty_or(response.message, "REJECTED");
            ScanOutcome::AccessRejected {
                code: code.to_string(),
                reason: RejectionReason::from_access_message(&message),
                message,
                event_name: response.event.map(|e| e.name),
            }
        }
    }

    /// Wrap a failed validation call.
    pub fn failure(error: impl std::fmt::Display) -> Self {
        ScanOutcome::Failure {
            message: error.to_string(),
        }
    }

    /// Dialog title for this outcome.
    pub fn title(&self) -> &'static str {
        match self {
            ScanOutcome::CheckinApproved { .. } => "Approved",
            ScanOutcome::CheckinRejected { reason, .. } => match reason {
                RejectionReason::AlreadyUsed => "Already used",
                RejectionReason::NotFound => "Not found",
                _ => "Rejected",
            },
            ScanOutcome::AccessGranted { .. } => "Welcome",
            ScanOutcome::AccessRejected { reason, .. } => match reason {
                RejectionReason::EventNotActive => "Event not active",
                RejectionReason::CodeDisabled => "Code disabled",
                RejectionReason::NotFound => "Not found",
                _ => "Rejected",
            },
            ScanOutcome::Failure { .. } => "Error",
        }
    }

    /// Dialog tone for this outcome.
    pub fn tone(&self) -> Tone {
        match self {
            ScanOutcome::CheckinApproved { .. } | ScanOutcome::AccessGranted { .. } => {
                Tone::Success
            }
            ScanOutcome::CheckinRejected {
                reason: RejectionReason::AlreadyUsed,
                ..
            } => Tone::Warning,
            _ => Tone::Error,
        }
    }

    /// The scanned code this outcome refers to, when there was one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ScanOutcome::CheckinApproved { code, .. }
            | ScanOutcome::CheckinRejected { code, .. }
            | ScanOutcome::AccessGranted { code, .. }
            | ScanOutcome::AccessRejected { code, .. } => Some(code),
            ScanOutcome::Failure { .. } => None,
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
