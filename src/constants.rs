//! Application constants for the Orap reporter
//!
//! Literal tokens of the legacy report formats, timestamp patterns, and
//! default service locations. Everything that the downstream ingestion
//! system parses byte-for-byte lives here.

// =============================================================================
// Legacy Report Literals
// =============================================================================

/// Station prefix that opens every hidden message line (9 digits + 6 spaces)
pub const HIDDEN_MESSAGE_PREFIX: &str = "012345678      ";

/// Message type code written after the reporting username
pub const HIDDEN_MESSAGE_TYPE_CODE: &str = "17";

/// Flag written after the observation timestamp in KL data lines
pub const KL_DATA_FLAG: &str = "3";

/// Trailing marker value of KL data lines
pub const KL_DATA_TRAILER: &str = "-6";

/// Field separator of all comma layouts
pub const FIELD_SEPARATOR: char = ',';

/// Column codes of the KL header line
pub const KL_COLUMN_HEADER: &str = "IX,WW,VV,HL,NN,NH,CL,CM,CH,W1,W2,HW,PW,DW1,PW1,HW1,DW2,PW2,HW2,DD,FF,CI,SI,BI,DI,ZI,XIS,ES,ERS,MLAT,MLON,TA,UU,UH,PR,PO,PP,AA,MDIR,MSPEED";

/// Marker that opens the raw input line of a KL message
pub const KL_INPUT_MARKER: &str = "Orap_smsformat_input";

/// Marker that opens the local data path line of a KL message
pub const KL_LOCAL_DATA_MARKER: &str = "Local_kvalobs_data";

/// Directory under which kvalobs stores received Orap files
pub const KL_LOCAL_DATA_DIRECTORY: &str = "/var/www/orap//orap_data//xenial-test//317/1";

/// Separator between scaled epoch and message in status lines
pub const KL_STATUS_SEPARATOR: &str = " || ";

/// Scale applied to the observation epoch in status lines
pub const KL_STATUS_EPOCH_SCALE: i64 = 10;

// =============================================================================
// Timestamp Patterns (strftime syntax, always rendered in UTC)
// =============================================================================

/// Date part of Orap action tags
pub const ACTION_TAG_DATE_FORMAT: &str = "%Y%m%d";

/// Received time embedded in the KL header line
pub const HIDDEN_KL_MESSAGE_RECEIVED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Observation (synop) time leading the KL data line
pub const HIDDEN_KL_MESSAGE_OBSERVATION_TIMESTAMP: &str = "%Y%m%d%H%M%S";

/// Received time used in the kvalobs file name
pub const HIDDEN_KL_MESSAGE_RECEIVED_FILE_NAME_TIMESTAMP: &str = "%Y%m%d%H%M%S";

// =============================================================================
// Multipart Form Framing
// =============================================================================

/// Boundary prefix used by the legacy upload endpoint
pub const WEBKIT_BOUNDARY_PREFIX: &str = "----WebKitFormBoundary";

/// Default number of random characters in a boundary id
pub const BOUNDARY_ID_LENGTH: usize = 16;

/// Form field names of an observation report upload
pub mod form_fields {
    pub const ACTION_TAG: &str = "action_tag";
    pub const USERNAME: &str = "username";
    pub const REPORTING_EPOCH: &str = "reporting_epoch";
    pub const HIDDEN_MESSAGE: &str = "hidden_message";
    pub const KL_MESSAGE: &str = "kl_message";
    pub const KL_STATUS: &str = "kl_status";
}

// =============================================================================
// Service Defaults
// =============================================================================

/// Default Orap server base URL
pub const DEFAULT_ORAP_SERVER_URL: &str = "https://orap.met.no";

/// Path prefix of Orap endpoints
pub const ORAP_PATH_PREFIX: &str = "/orap/";

/// Observation report endpoint below the prefix
pub const ORAP_OBS_REPORT: &str = "obs_report";

/// Default base URL of the snap message REST API
pub const DEFAULT_SNAP_API_URL: &str = "https://fiskinfo.no/";

/// Echogram metadata resource
pub const ECHOGRAM_INFOS_PATH: &str = "api/echograminfos";

/// Snap message resource
pub const SNAP_MESSAGES_PATH: &str = "api/snapmessages";

/// Query parameter toggling embedded echogram info on snap message lists
pub const WITH_ECHOGRAM_PARAM: &str = "withechogram";

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "orap-reporter";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the Orap server URL
pub const ENV_ORAP_SERVER_URL: &str = "ORAP_SERVER_URL";

/// Environment variable overriding the snap API URL
pub const ENV_SNAP_API_URL: &str = "SNAP_API_URL";

/// Build the full boundary delimiter for a boundary id
pub fn webkit_boundary(boundary_id: &str) -> String {
    format!("{}{}", WEBKIT_BOUNDARY_PREFIX, boundary_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_prefix_width() {
        assert_eq!(HIDDEN_MESSAGE_PREFIX.len(), 15);
        assert!(HIDDEN_MESSAGE_PREFIX.starts_with("012345678"));
    }

    #[test]
    fn test_kl_header_has_forty_columns() {
        assert_eq!(KL_COLUMN_HEADER.split(FIELD_SEPARATOR).count(), 40);
    }

    #[test]
    fn test_webkit_boundary() {
        assert_eq!(webkit_boundary("abc"), "----WebKitFormBoundaryabc");
    }
}
