/// Application naming shared by the binary and the configuration loader
pub const APP_NAME: &str = "almanac";
pub const ENV_PREFIX: &str = "ALMANAC";
pub const CONFIG_FILE: &str = const_str::concat!(APP_NAME, ".toml");
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Block delimiters
pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

/// Component names
pub const VCALENDAR: &str = "VCALENDAR";
pub const VEVENT: &str = "VEVENT";
pub const VTIMEZONE: &str = "VTIMEZONE";
pub const STANDARD: &str = "STANDARD";
pub const DAYLIGHT: &str = "DAYLIGHT";

/// Property names
pub const TZID: &str = "TZID";
pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
pub const TZOFFSETTO: &str = "TZOFFSETTO";
pub const TZNAME: &str = "TZNAME";
pub const UID: &str = "UID";
pub const SUMMARY: &str = "SUMMARY";
pub const DTSTAMP: &str = "DTSTAMP";
pub const DTSTART: &str = "DTSTART";
pub const DTEND: &str = "DTEND";
pub const DURATION: &str = "DURATION";
pub const RRULE: &str = "RRULE";

/// Parameter names
pub const PARAM_TZID: &str = TZID;
pub const PARAM_VALUE: &str = "VALUE";
