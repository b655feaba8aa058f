//! Emergency-contacts directory.
//!
//! National helpline numbers, fixed at compile time. The SOS path always
//! dials the unified emergency number.

use serde::{Deserialize, Serialize};

/// Number the auto-SOS escalation dials.
pub const SOS_NUMBER: &str = "112";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Service {
    Police,
    Fire,
    Ambulance,
    Unified,
    DisasterManagement,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub service: Service,
}

const DIRECTORY: &[EmergencyContact] = &[
    EmergencyContact {
        name: "Police",
        number: "100",
        service: Service::Police,
    },
    EmergencyContact {
        name: "Fire Brigade",
        number: "101",
        service: Service::Fire,
    },
    EmergencyContact {
        name: "Ambulance",
        number: "108",
        service: Service::Ambulance,
    },
    EmergencyContact {
        name: "Emergency",
        number: "112",
        service: Service::Unified,
    },
    EmergencyContact {
        name: "Disaster Management",
        number: "1078",
        service: Service::DisasterManagement,
    },
];

/// All known contacts, in display order.
pub fn all() -> &'static [EmergencyContact] {
    DIRECTORY
}

/// Look a contact up by its dialed number.
pub fn by_number(number: &str) -> Option<&'static EmergencyContact> {
    DIRECTORY.iter().find(|c| c.number == number)
}
