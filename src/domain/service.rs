use super::ConfigLookup;
use std::fmt;
use std::str::FromStr;

/// Keys of every service the registry knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    Db,
    Amq,
    BrixApp,
    BrixPoller,
    BrixRestApi,
    BrixGui,
    BrixReceiver,
    Simple1,
    Simple2,
}

impl ServiceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Db => "db",
            Self::Amq => "amq",
            Self::BrixApp => "brix-app",
            Self::BrixPoller => "brix-poller",
            Self::BrixRestApi => "brix-restapi",
            Self::BrixGui => "brix-gui",
            Self::BrixReceiver => "brix-receiver",
            Self::Simple1 => "simple1",
            Self::Simple2 => "simple2",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKey {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_by_name(s)
            .map(|descriptor| descriptor.key)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownService(pub String);

impl fmt::Display for UnknownService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service '{}'", self.0)
    }
}

impl std::error::Error for UnknownService {}

/// Static metadata for a manageable service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub key: ServiceKey,
    pub port: u16,
    /// Key looked up in the `[Default]` config section to override the container name
    pub config_key: &'static str,
    pub default_name: &'static str,
    /// Whether start/stop/restart apply; the others are status-only
    pub startable: bool,
}

const fn descriptor(
    key: ServiceKey,
    port: u16,
    config_key: &'static str,
    default_name: &'static str,
    startable: bool,
) -> ServiceDescriptor {
    ServiceDescriptor {
        key,
        port,
        config_key,
        default_name,
        startable,
    }
}

pub const DATABASE_PORT: u16 = 5432;

/// Registry in declaration order. Status tables preserve this order.
pub static REGISTRY: &[ServiceDescriptor] = &[
    descriptor(ServiceKey::Db, DATABASE_PORT, "databasename", "brix_postgres", true),
    descriptor(ServiceKey::Amq, 61616, "activemqname", "brix_activemq", true),
    descriptor(ServiceKey::BrixApp, 8080, "brixapp", "brix-app", false),
    descriptor(ServiceKey::BrixPoller, 8084, "brixpoller", "brix-poller", false),
    descriptor(ServiceKey::BrixRestApi, 8088, "brixrest", "brix-restapi", false),
    descriptor(ServiceKey::BrixGui, 3000, "brixgui", "brix-gui", false),
    // "brixreciever" is the key existing config files use
    descriptor(ServiceKey::BrixReceiver, 8083, "brixreciever", "brix-receiver", false),
    descriptor(ServiceKey::Simple1, 8091, "simple1", "simple1", false),
    descriptor(ServiceKey::Simple2, 8092, "simple2", "simple2", false),
];

pub fn lookup(key: ServiceKey) -> &'static ServiceDescriptor {
    REGISTRY
        .iter()
        .find(|d| d.key == key)
        .unwrap_or_else(|| unreachable!("every ServiceKey has a registry entry"))
}

pub fn lookup_by_name(name: &str) -> Option<&'static ServiceDescriptor> {
    REGISTRY.iter().find(|d| d.key.as_str() == name)
}

pub fn all_keys() -> impl Iterator<Item = ServiceKey> {
    REGISTRY.iter().map(|d| d.key)
}

pub fn startable() -> impl Iterator<Item = &'static ServiceDescriptor> {
    REGISTRY.iter().filter(|d| d.startable)
}

/// A descriptor bound to the container name that applies for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedService {
    pub key: ServiceKey,
    pub name: String,
    pub port: u16,
}

impl ServiceDescriptor {
    pub fn resolve(&self, config: &dyn ConfigLookup) -> ResolvedService {
        let name = config
            .default_value(self.config_key)
            .unwrap_or(self.default_name)
            .to_string();

        ResolvedService {
            key: self.key,
            name,
            port: self.port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Running,
    Stopped,
}

impl ServiceStatus {
    pub fn from_running(running: bool) -> Self {
        if running { Self::Running } else { Self::Stopped }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// One reconciled row of a status table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub key: ServiceKey,
    pub name: String,
    pub port: u16,
    /// Port reachability; this is the status shown to the user
    pub port_status: ServiceStatus,
    pub container_status: ServiceStatus,
}

impl StatusReport {
    pub fn agreement(&self) -> bool {
        self.port_status == self.container_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Overrides(&'static [(&'static str, &'static str)]);

    impl ConfigLookup for Overrides {
        fn default_value(&self, key: &str) -> Option<&str> {
            self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
        }
    }

    #[test]
    fn test_registry_keys_are_unique() {
        let keys: HashSet<_> = all_keys().collect();
        assert_eq!(keys.len(), REGISTRY.len());
    }

    #[test]
    fn test_registry_ports_are_unique() {
        let ports: HashSet<_> = REGISTRY.iter().map(|d| d.port).collect();
        assert_eq!(ports.len(), REGISTRY.len());
    }

    #[test]
    fn test_all_keys_preserves_declaration_order() {
        let keys: Vec<_> = all_keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "db",
                "amq",
                "brix-app",
                "brix-poller",
                "brix-restapi",
                "brix-gui",
                "brix-receiver",
                "simple1",
                "simple2",
            ]
        );
    }

    #[test]
    fn test_startable_subset() {
        let keys: Vec<_> = startable().map(|d| d.key).collect();
        assert_eq!(keys, vec![ServiceKey::Db, ServiceKey::Amq]);
    }

    #[test]
    fn test_lookup_by_name() {
        let db = lookup_by_name("db").unwrap();
        assert_eq!(db.port, DATABASE_PORT);
        assert_eq!(db.default_name, "brix_postgres");
        assert!(lookup_by_name("redis").is_none());
    }

    #[test]
    fn test_key_round_trips_through_str() {
        for key in all_keys() {
            assert_eq!(key.as_str().parse::<ServiceKey>(), Ok(key));
            assert_eq!(lookup(key).key, key);
        }
        assert_eq!(
            "ALL".parse::<ServiceKey>(),
            Err(UnknownService("ALL".to_string()))
        );
    }

    #[test]
    fn test_resolve_falls_back_to_default_name() {
        let config = Overrides(&[]);
        for descriptor in REGISTRY {
            let resolved = descriptor.resolve(&config);
            assert_eq!(resolved.name, descriptor.default_name);
            assert_eq!(resolved.port, descriptor.port);
        }
    }

    #[test]
    fn test_resolve_uses_override() {
        let config = Overrides(&[("databasename", "my_pg")]);
        let resolved = lookup(ServiceKey::Db).resolve(&config);
        assert_eq!(resolved.name, "my_pg");

        let amq = lookup(ServiceKey::Amq).resolve(&config);
        assert_eq!(amq.name, "brix_activemq");
    }

    #[test]
    fn test_status_report_agreement() {
        let mut report = StatusReport {
            key: ServiceKey::Db,
            name: "brix_postgres".into(),
            port: DATABASE_PORT,
            port_status: ServiceStatus::Running,
            container_status: ServiceStatus::Running,
        };
        assert!(report.agreement());

        report.container_status = ServiceStatus::Stopped;
        assert!(!report.agreement());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ServiceStatus::Running.to_string(), "running");
        assert_eq!(ServiceStatus::Stopped.to_string(), "stopped");
        assert_eq!(ServiceStatus::from_running(true), ServiceStatus::Running);
    }
}
