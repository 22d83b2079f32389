//! Masters and instances
//!
//! With `N` active axes the design space is an `N`-dimensional box. One
//! master is built for each of its `2^N` corners; named instances are
//! points inside the box that font build tools interpolate.

use super::axes::{Axis, Location};
use crate::core::errors::ConfigError;
use std::str::FromStr;

/// One corner of the design space
#[derive(Debug, Clone, PartialEq)]
pub struct Master {
    /// Axis labels joined by spaces, e.g. `"Thin Round"`; empty when static
    pub name: String,
    pub location: Location,
}

/// A named interpolated style
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Style suffix; empty for the default instance
    pub name: String,
    pub location: Location,
}

/// Instance as declared by the user, before validation
///
/// Written as `Name:TAG=value,TAG=value`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSpec {
    pub name: String,
    pub values: Vec<(String, f64)>,
}

impl FromStr for InstanceSpec {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedInstance(text.to_string());
        let (name, assignments) = text.split_once(':').ok_or_else(malformed)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(malformed());
        }

        let mut values = Vec::new();
        for assignment in assignments.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let (tag, value) = assignment.split_once('=').ok_or_else(malformed)?;
            let value: f64 = value.trim().parse().map_err(|_| malformed())?;
            if !value.is_finite() {
                return Err(malformed());
            }
            values.push((tag.trim().to_string(), value));
        }
        Ok(Self {
            name: name.to_string(),
            values,
        })
    }
}

/// Resolved design space of one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct VariationPlan {
    pub axes: Vec<&'static Axis>,
    pub masters: Vec<Master>,
    pub instances: Vec<Instance>,
}

impl VariationPlan {
    /// Validate instance declarations against the active axes and
    /// enumerate masters.
    pub fn new(axes: Vec<&'static Axis>, specs: &[InstanceSpec]) -> Result<Self, ConfigError> {
        if axes.is_empty() {
            if let Some(spec) = specs.first() {
                return Err(ConfigError::InstanceWithoutAxes(spec.name.clone()));
            }
            return Ok(Self {
                axes,
                masters: vec![Master {
                    name: String::new(),
                    location: Location::new(),
                }],
                instances: Vec::new(),
            });
        }

        let masters = enumerate_masters(&axes);
        let mut instances = vec![Instance {
            name: String::new(),
            location: Location::new(),
        }];
        for spec in specs {
            instances.push(resolve_instance(&axes, spec)?);
        }

        Ok(Self {
            axes,
            masters,
            instances,
        })
    }

    /// Static fonts have no active axis and a single master
    pub fn is_variable(&self) -> bool {
        !self.axes.is_empty()
    }
}

/// Master `i` puts axis `k` at its maximum when bit `k` of `i` is set
pub fn enumerate_masters(axes: &[&'static Axis]) -> Vec<Master> {
    (0..1usize << axes.len())
        .map(|index| {
            let mut location = Location::new();
            let mut labels = Vec::with_capacity(axes.len());
            for (bit, axis) in axes.iter().enumerate() {
                if index & (1 << bit) != 0 {
                    location.set(axis.kind, axis.maximum);
                    labels.push(axis.max_label);
                } else {
                    location.set(axis.kind, axis.minimum);
                    labels.push(axis.min_label);
                }
            }
            Master {
                name: labels.join(" "),
                location,
            }
        })
        .collect()
}

fn resolve_instance(axes: &[&'static Axis], spec: &InstanceSpec) -> Result<Instance, ConfigError> {
    let mut location = Location::new();
    for (tag, value) in &spec.values {
        let axis = Axis::by_tag(tag).ok_or_else(|| ConfigError::UnknownAxis(tag.clone()))?;
        if !axes.iter().any(|active| active.kind == axis.kind) {
            return Err(ConfigError::InactiveInstanceAxis {
                instance: spec.name.clone(),
                axis: axis.tag.to_string(),
            });
        }
        if !axis.contains(*value) {
            return Err(ConfigError::InstanceValueOutOfRange {
                instance: spec.name.clone(),
                axis: axis.tag.to_string(),
                value: *value,
                minimum: axis.minimum,
                maximum: axis.maximum,
            });
        }
        location.set(axis.kind, *value);
    }
    Ok(Instance {
        name: spec.name.clone(),
        location,
    })
}
