//! Quick-fill values offered next to the mapping and provider fields.

/// A named preset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub value: &'static str,
}

/// Company mapping ids that skip the employer search step.
pub const COMPANY_MAPPING_PRESETS: [Preset; 3] = [
    Preset {
        name: "Facebook",
        value: "539aad839b51435aa8e525fed95f1688",
    },
    Preset {
        name: "Kroger",
        value: "3f45aed287064cbc91d28eff0424a72a",
    },
    Preset {
        name: "Fannie Mae",
        value: "4af9336b89294bc98879b1e38e6c72df",
    },
];

/// Provider ids that skip the payroll provider step.
pub const PROVIDER_PRESETS: [Preset; 1] = [Preset {
    name: "ADP",
    value: "adp",
}];

/// Look up a company mapping preset by name, ignoring case.
pub fn company_mapping(name: &str) -> Option<&'static Preset> {
    COMPANY_MAPPING_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Look up a provider preset by name, ignoring case.
pub fn provider(name: &str) -> Option<&'static Preset> {
    PROVIDER_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}
