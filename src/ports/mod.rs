/// Ports module defining interfaces for hexagonal architecture
///
/// The application core talks to the conda installation, the filesystem and
/// the terminal only through the outbound (driven) ports defined here.
pub mod outbound;
