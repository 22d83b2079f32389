//! Variable design space: element axes, masters and named instances

pub mod axes;
pub mod planner;

pub use axes::{parse_axes, Axis, AxisKind, Location, AXES};
pub use planner::{enumerate_masters, Instance, InstanceSpec, Master, VariationPlan};
