// Módulos
pub mod appointments;
pub mod client;
pub mod documents;
pub mod patients;
pub mod products;
pub mod reports;

// Re-exportar el cliente y las operaciones principales
pub use appointments::{fetch_appointments, AppointmentScope};
pub use client::{eq, StoreError, Supabase};
pub use documents::{fetch_documents, upload_document};
pub use patients::{create_patient, fetch_patients};
pub use products::fetch_products;
pub use reports::submit_report;
