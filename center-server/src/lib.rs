//! Learning Center Server
//!
//! Backend for a small tutoring center: teachers, groups, students,
//! enrollments, attendance and tuition payments, with daily/monthly/yearly
//! reporting derived from the raw records.
//!
//! # Module structure
//!
//! ```text
//! center-server/src/
//! ├── core/        # configuration, state, server bootstrap
//! ├── utils/       # errors, logging, date helpers
//! ├── db/          # SQLite pool, migrations, repositories
//! ├── enrollment/  # enrollment lifecycle (enroll/withdraw/purge)
//! ├── reports/     # daily/monthly/yearly aggregation
//! ├── services/    # CRUD business rules over the repositories
//! ├── seed/        # deterministic demo data (explicitly invoked)
//! └── api/         # HTTP routes and handlers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod enrollment;
pub mod reports;
pub mod seed;
pub mod services;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use enrollment::EnrollmentManager;
pub use reports::ReportService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
