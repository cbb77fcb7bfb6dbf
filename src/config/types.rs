use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A parsed `<name>.yml` document. Every section is optional; an absent
/// section means there is nothing to create for it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub networks: NameSet,
    pub volumes: NameSet,
    pub container: Option<ContainerSpec>,
}

/// The single container this config launches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerSpec {
    #[serde(deserialize_with = "scalar")]
    pub image: String,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub network: Option<String>,
    #[serde(default, deserialize_with = "volume_mappings")]
    pub volume: Vec<VolumeMapping>,
    #[serde(default, deserialize_with = "scalar_list")]
    pub ports: Vec<String>,
    #[serde(default, deserialize_with = "env_entries")]
    pub environment: Vec<EnvEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMapping {
    pub host: String,
    pub container: String,
}

impl VolumeMapping {
    /// `host:container`, the form the runtime's `-v` flag expects.
    pub fn to_flag_value(&self) -> String {
        format!("{}:{}", self.host, self.container)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

impl EnvEntry {
    pub fn to_flag_value(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Ordered, de-duplicated set of resource names.
///
/// Accepts a mapping (names are the keys, values are ignored), a sequence of
/// names, or null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet(Vec<String>);

impl NameSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: String) {
        if !name.is_empty() && !self.0.contains(&name) {
            self.0.push(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::default();
        for name in iter {
            set.insert(name.into());
        }
        set
    }
}

impl<'de> Deserialize<'de> for NameSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameSetVisitor;

        impl<'de> Visitor<'de> for NameSetVisitor {
            type Value = NameSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping or a list of names")
            }

            fn visit_unit<E: de::Error>(self) -> Result<NameSet, E> {
                Ok(NameSet::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<NameSet, E> {
                Ok(NameSet::default())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<NameSet, A::Error> {
                let mut set = NameSet::default();
                while let Some(Scalar(name)) = seq.next_element::<Scalar>()? {
                    set.insert(name);
                }
                Ok(set)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NameSet, A::Error> {
                let mut set = NameSet::default();
                while let Some((Scalar(name), IgnoredAny)) = map.next_entry::<Scalar, IgnoredAny>()? {
                    set.insert(name);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(NameSetVisitor)
    }
}

/// Any YAML scalar, rendered as text. Numbers and booleans keep their literal
/// form and null becomes the empty string.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string, number, boolean or null")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Scalar, E> {
                Ok(Scalar(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Scalar, E> {
                Ok(Scalar(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Scalar, E> {
                Ok(Scalar(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Scalar, E> {
                Ok(Scalar(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Scalar, E> {
                Ok(Scalar(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Scalar, E> {
                Ok(Scalar(value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(String::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(String::new()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// One list item of `volume:` or `environment:`. Usually a single pair, but
/// every pair of the mapping is kept in document order.
struct Pairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for Pairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Pairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping such as `KEY: value`")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Pairs, E> {
                Ok(Pairs(Vec::new()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Pairs, A::Error> {
                let mut pairs = Vec::new();
                while let Some((Scalar(k), Scalar(v))) = map.next_entry::<Scalar, Scalar>()? {
                    pairs.push((k, v));
                }
                Ok(Pairs(pairs))
            }
        }

        deserializer.deserialize_any(PairsVisitor)
    }
}

fn flat_pairs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, String)>, D::Error> {
    let items = Option::<Vec<Pairs>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flat_map(|p| p.0).collect())
}

fn volume_mappings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<VolumeMapping>, D::Error> {
    Ok(flat_pairs(deserializer)?
        .into_iter()
        .map(|(host, container)| VolumeMapping { host, container })
        .collect())
}

fn env_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<EnvEntry>, D::Error> {
    Ok(flat_pairs(deserializer)?
        .into_iter()
        .map(|(key, value)| EnvEntry { key, value })
        .collect())
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer).map(|s| s.0)
}

/// Null means "not set" here rather than the empty string.
fn optional_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
}

fn scalar_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = Option::<Vec<Scalar>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().map(|s| s.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Configuration {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn networks_from_mapping_keys() {
        let cfg = parse("networks:\n  backend:\n  frontend: {}\n");
        let names: Vec<_> = cfg.networks.iter().collect();
        assert_eq!(names, ["backend", "frontend"]);
    }

    #[test]
    fn volumes_from_list_are_deduplicated() {
        let cfg = parse("volumes:\n  - data\n  - cache\n  - data\n");
        let names: Vec<_> = cfg.volumes.iter().collect();
        assert_eq!(names, ["data", "cache"]);
    }

    #[test]
    fn null_sections_are_empty() {
        let cfg = parse("networks:\nvolumes: ~\n");
        assert!(cfg.networks.is_empty());
        assert!(cfg.volumes.is_empty());
        assert!(cfg.container.is_none());
    }

    #[test]
    fn container_spec_full() {
        let cfg = parse(
            r#"
container:
  image: postgres:16
  name: db
  network: backend
  volume:
    - /srv/pg: /var/lib/postgresql/data
    - pgconf: /etc/postgresql
  ports:
    - "5432:5432"
  environment:
    - POSTGRES_PASSWORD: secret
    - POSTGRES_DB: app
"#,
        );
        let spec = cfg.container.unwrap();
        assert_eq!(spec.image, "postgres:16");
        assert_eq!(spec.name.as_deref(), Some("db"));
        assert_eq!(spec.network.as_deref(), Some("backend"));
        assert_eq!(spec.volume.len(), 2);
        assert_eq!(spec.volume[0].to_flag_value(), "/srv/pg:/var/lib/postgresql/data");
        assert_eq!(spec.volume[1].host, "pgconf");
        assert_eq!(spec.ports, ["5432:5432"]);
        assert_eq!(spec.environment[0].to_flag_value(), "POSTGRES_PASSWORD=secret");
        assert_eq!(spec.environment[1].key, "POSTGRES_DB");
    }

    #[test]
    fn environment_keeps_duplicates_in_order() {
        let cfg = parse(
            "container:\n  image: img\n  environment:\n    - A: one\n    - A: two\n",
        );
        let env = cfg.container.unwrap().environment;
        assert_eq!(env.len(), 2);
        assert_eq!(env[0].value, "one");
        assert_eq!(env[1].value, "two");
    }

    #[test]
    fn multi_pair_entry_emits_every_pair() {
        let cfg = parse("container:\n  image: img\n  volume:\n    - {/a: /b, /c: /d}\n");
        let vols = cfg.container.unwrap().volume;
        assert_eq!(vols.len(), 2);
        assert_eq!(vols[1].to_flag_value(), "/c:/d");
    }

    #[test]
    fn non_string_scalars_are_rendered() {
        let cfg = parse(
            "container:\n  image: img\n  ports:\n    - 8080\n  environment:\n    - PORT: 8080\n    - DEBUG: true\n    - EMPTY:\n",
        );
        let spec = cfg.container.unwrap();
        assert_eq!(spec.ports, ["8080"]);
        let values: Vec<_> = spec.environment.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["8080", "true", ""]);
    }

    #[test]
    fn numeric_name_and_network_are_text() {
        let cfg = parse("container:\n  image: img\n  name: 2024\n  network: 1\n");
        let spec = cfg.container.unwrap();
        assert_eq!(spec.name.as_deref(), Some("2024"));
        assert_eq!(spec.network.as_deref(), Some("1"));
    }

    #[test]
    fn null_name_is_unset() {
        let cfg = parse("container:\n  image: img\n  name:\n");
        assert_eq!(cfg.container.unwrap().name, None);
    }

    #[test]
    fn container_requires_image() {
        let result: Result<Configuration, _> = serde_yaml::from_str("container:\n  name: c\n");
        assert!(result.is_err());
    }

    #[test]
    fn container_rejects_unknown_keys() {
        let result: Result<Configuration, _> =
            serde_yaml::from_str("container:\n  image: img\n  volumes:\n    - /a: /b\n");
        assert!(result.is_err());
    }

    #[test]
    fn name_set_from_iterator() {
        let set: NameSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
