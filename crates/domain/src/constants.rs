//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Paging
pub const PAGE_SIZE: u32 = 10;

// Aggregation and import preview
pub const TOP_N: usize = 5;
pub const PREVIEW_ROWS: usize = 5;
pub const RECENT_DAYS_WINDOW: i64 = 30;
pub const RECENT_MONTHS_WINDOW: usize = 12;

// Roles
pub const ADMIN_ROLE: &str = "admin";
pub const DEFAULT_ROLE: &str = "consulta";
pub const PROFILES_TABLE: &str = "profiles";
pub const PROFILE_ROLE_COLUMN: &str = "rol";

// Audit columns stamped on every write
pub const ID_COLUMN: &str = "id";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const CREATOR_ID_COLUMN: &str = "creado_por_id";
pub const CREATOR_NAME_COLUMN: &str = "creado_por_nombre";
pub const OWNER_COLUMN: &str = "user_id";

// Export
pub const EXPORT_EXTENSION: &str = "xlsx";
pub const EXPORT_FROM_PLACEHOLDER: &str = "inicio";
pub const EXPORT_TO_PLACEHOLDER: &str = "fin";
pub const TEMPLATE_DATA_SHEET: &str = "Datos";
pub const TEMPLATE_INSTRUCTIONS_SHEET: &str = "Instrucciones";

// Configuration defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_SESSION_FILE: &str = ".opsboard-session.json";
pub const DEFAULT_TIMEZONE: &str = "America/Bogota";
pub const DEFAULT_LOG_LEVEL: &str = "info";
