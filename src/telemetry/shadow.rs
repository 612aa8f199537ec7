//! Device-shadow document and topic derivation

use serde::{Deserialize, Serialize};

use crate::detection::StateReport;

/// Wire document for a shadow update: `{"state":{"reported":{...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowUpdate {
    /// State container
    pub state: ShadowState,
}

/// `state` member of a shadow update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowState {
    /// Latest reported device state
    pub reported: StateReport,
}

impl ShadowUpdate {
    /// Wrap a state report in the shadow envelope.
    pub fn reported(report: StateReport) -> Self {
        Self {
            state: ShadowState { reported: report },
        }
    }
}

/// Topic a device publishes shadow updates to.
pub fn update_topic(root: &str, device_name: &str) -> String {
    format!("{root}/things/{device_name}/shadow/update")
}

/// Topic the backend acknowledges accepted updates on.
pub fn accepted_topic(root: &str, device_name: &str) -> String {
    format!("{}/accepted", update_topic(root, device_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_roundtrips_through_shadow_json() {
        let report = StateReport::new(42.5, Some("dBox-001".to_string()));
        let json = serde_json::to_string(&ShadowUpdate::reported(report.clone())).unwrap();

        let parsed: ShadowUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.state.reported, report);
    }

    #[test]
    fn device_field_is_omitted_when_unset() {
        let doc = serde_json::to_value(ShadowUpdate::reported(StateReport::new(10.0, None))).unwrap();

        assert!(doc["state"]["reported"].get("device").is_none());
        assert!(doc["state"]["reported"]["timestamp"].is_string());
        assert_eq!(doc["state"]["reported"]["distance"], 10.0);
    }

    #[test]
    fn topics_follow_the_shadow_scheme() {
        assert_eq!(
            update_topic("$aws", "g39_pi"),
            "$aws/things/g39_pi/shadow/update"
        );
        assert_eq!(
            accepted_topic("$aws", "g39_pi"),
            "$aws/things/g39_pi/shadow/update/accepted"
        );
    }
}
