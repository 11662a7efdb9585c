/// Registration regions accepted on a plate: US states and territories,
/// Canadian provinces, and the DMV's diplomatic/foreign/government codes.
pub const REGION_CODES: &[&str] = &[
    "99", "AB", "AK", "AL", "AR", "AZ", "BC", "CA", "CO", "CT", "DC", "DE", "DP", "FL", "FM",
    "FO", "GA", "GU", "GV", "HI", "IA", "ID", "IL", "IN", "KS", "KY", "LA", "MA", "MB", "MD",
    "ME", "MI", "MN", "MO", "MP", "MS", "MT", "MX", "NB", "NC", "ND", "NE", "NF", "NH", "NJ",
    "NM", "NS", "NT", "NV", "NY", "OH", "OK", "ON", "OR", "PA", "PE", "PR", "PW", "QB", "RI",
    "SC", "SD", "SK", "TN", "TX", "UT", "VA", "VI", "VT", "WA", "WI", "WV", "WY", "YT",
];

/// Registration classes printed on New York plates.
pub const PLATE_TYPE_CODES: &[&str] = &[
    "AGC", "AGR", "AMB", "APP", "ARG", "ATD", "ATV", "AYG", "BOB", "BOT", "CBS", "CCK", "CHC",
    "CLG", "CMB", "CME", "CMH", "COM", "CSP", "DLR", "FAR", "FPW", "GAC", "GSM", "HAC", "HAM",
    "HIR", "HIS", "HOU", "HSM", "IRP", "ITP", "JCA", "JCL", "JSC", "JWV", "LMA", "LMB", "LMC",
    "LOC", "LTR", "LUA", "MCD", "MCL", "MED", "MOT", "NLM", "NYA", "NYC", "NYS", "OMF", "OML",
    "OMO", "OMR", "OMS", "OMT", "OMV", "ORC", "ORG", "ORM", "PAS", "PHS", "PPH", "PSD", "RGC",
    "RGL", "SCL", "SEM", "SNO", "SOS", "SPC", "SPO", "SRF", "SRN", "STA", "STG", "SUP", "THC",
    "TOW", "TRA", "TRC", "TRL", "USC", "USS", "VAS", "VPL", "WUG",
];

/// Expects an already upper-cased code.
pub fn is_region_code(code: &str) -> bool {
    REGION_CODES.contains(&code)
}

/// Expects an already upper-cased code.
pub fn is_plate_type_code(code: &str) -> bool {
    PLATE_TYPE_CODES.contains(&code)
}
