pub mod config;
pub mod podman_adapter;
pub mod port_probe;
pub mod process;

pub use podman_adapter::PodmanAdapter;
pub use port_probe::TcpPortProbe;
pub use process::SystemCommandRunner;
