// =============================================================================
// GOOGLE WORKSPACE ADAPTERS
// =============================================================================
//
// Implementations of the sources ports over Google's REST APIs:
// - `sheets_client` reads the script column (Sheets v4)
// - `docs_client` creates/edits the doc (Docs v1) and files it (Drive v3)
// - `auth` hands both of them bearer tokens
//
// The core never sees any of the JSON shapes used here.

pub mod auth;
pub mod docs_client;
pub mod sheets_client;

pub use auth::GoogleAuth;
pub use docs_client::GoogleDocsClient;
pub use sheets_client::GoogleSheetsClient;
