//! Designspace output for variable builds
//!
//! Describes the active axes, one source per master UFO and the named
//! instances, plus a `config.yaml` that points font build tooling at the
//! designspace.

use super::ufo::ufo_file_name;
use crate::font_source::metrics::FontInfo;
use crate::variation::{Axis, Location, VariationPlan};
use anyhow::{Context, Result};
use norad::designspace::{self, DesignSpaceDocument, Dimension};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const FORMAT_VERSION: f32 = 4.1;

pub fn designspace_file_name(info: &FontInfo) -> String {
    format!("{}.designspace", info.font_name().replace(' ', "-"))
}

fn dimensions(axes: &[&'static Axis], location: &Location) -> Vec<Dimension> {
    axes.iter()
        .map(|axis| Dimension {
            name: axis.name.to_string(),
            uservalue: None,
            xvalue: Some(location.get(axis.kind) as f32),
            yvalue: None,
        })
        .collect()
}

pub fn designspace_document(info: &FontInfo, plan: &VariationPlan) -> DesignSpaceDocument {
    let axes = plan
        .axes
        .iter()
        .map(|axis| designspace::Axis {
            name: axis.name.to_string(),
            tag: axis.tag.to_string(),
            default: axis.default as f32,
            minimum: Some(axis.minimum as f32),
            maximum: Some(axis.maximum as f32),
            ..Default::default()
        })
        .collect();

    let sources = plan
        .masters
        .iter()
        .map(|master| designspace::Source {
            name: Some(ufo_file_name(info, &master.name).trim_end_matches(".ufo").to_string()),
            familyname: Some(info.family_name.clone()),
            stylename: Some(info.style_name_with(&master.name)),
            filename: ufo_file_name(info, &master.name),
            location: dimensions(&plan.axes, &master.location),
            ..Default::default()
        })
        .collect();

    let instances = plan
        .instances
        .iter()
        .map(|instance| {
            let style_name = info.style_name_with(&instance.name);
            let font_name = format!("{} {}", info.family_name, style_name);
            designspace::Instance {
                name: Some(font_name.clone()),
                familyname: Some(info.family_name.clone()),
                stylename: Some(style_name),
                filename: Some(ufo_file_name(info, &instance.name)),
                postscriptfontname: Some(font_name.replace(' ', "-")),
                location: dimensions(&plan.axes, &instance.location),
                ..Default::default()
            }
        })
        .collect();

    DesignSpaceDocument {
        format: FORMAT_VERSION,
        axes,
        sources,
        instances,
        ..Default::default()
    }
}

/// Build configuration listing the designspace and the axis order
#[derive(Debug, Serialize)]
struct BuildConfig {
    sources: Vec<String>,
    #[serde(rename = "axisOrder")]
    axis_order: Vec<&'static str>,
}

pub fn config_yaml(designspace_file: &str, plan: &VariationPlan) -> Result<String> {
    let config = BuildConfig {
        sources: vec![designspace_file.to_string()],
        axis_order: plan.axes.iter().map(|axis| axis.tag).collect(),
    };
    serde_yaml::to_string(&config).context("Failed to serialize build config")
}

/// Write the designspace and `config.yaml` into `directory`
pub fn write_designspace(
    directory: impl AsRef<Path>,
    info: &FontInfo,
    plan: &VariationPlan,
) -> Result<PathBuf> {
    let directory = directory.as_ref();
    let file_name = designspace_file_name(info);
    let path = directory.join(&file_name);

    designspace_document(info, plan)
        .save(&path)
        .with_context(|| format!("Failed to write designspace {}", path.display()))?;
    debug!("Wrote {}", path.display());

    let config_path = directory.join("config.yaml");
    std::fs::write(&config_path, config_yaml(&file_name, plan)?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variation::{parse_axes, InstanceSpec};
    use pretty_assertions::assert_eq;

    fn info() -> FontInfo {
        FontInfo {
            family_name: "Pixel Sans".into(),
            style_name: "Bold".into(),
            ..Default::default()
        }
    }

    fn plan() -> VariationPlan {
        let specs = vec!["LCD:ESIZ=85".parse::<InstanceSpec>().unwrap()];
        VariationPlan::new(parse_axes("ESIZ,ROND").unwrap(), &specs).unwrap()
    }

    #[test]
    fn document_lists_axes_sources_and_instances() {
        let document = designspace_document(&info(), &plan());

        assert_eq!(document.axes.len(), 2);
        assert_eq!(document.axes[0].tag, "ESIZ");
        assert_eq!(document.axes[0].default, 100.0);

        let files: Vec<_> = document.sources.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "Pixel-Sans-Bold-Thin-Square.ufo",
                "Pixel-Sans-Bold-Thick-Square.ufo",
                "Pixel-Sans-Bold-Thin-Round.ufo",
                "Pixel-Sans-Bold-Thick-Round.ufo",
            ]
        );
        assert_eq!(document.sources[1].location[0].xvalue, Some(100.0));
        assert_eq!(document.sources[1].location[1].xvalue, Some(0.0));

        let styles: Vec<_> = document
            .instances
            .iter()
            .map(|instance| instance.stylename.clone().unwrap_or_default())
            .collect();
        assert_eq!(styles, vec!["Bold", "Bold LCD"]);
        assert_eq!(document.instances[1].location[0].xvalue, Some(85.0));
        assert_eq!(document.instances[1].location[1].xvalue, Some(0.0));
    }

    #[test]
    fn config_lists_axis_order() {
        let yaml = config_yaml("Pixel-Sans-Bold.designspace", &plan()).unwrap();
        let config: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config["sources"][0].as_str(), Some("Pixel-Sans-Bold.designspace"));
        assert_eq!(config["axisOrder"][0].as_str(), Some("ESIZ"));
        assert_eq!(config["axisOrder"][1].as_str(), Some("ROND"));
    }

    #[test]
    fn config_quotes_yaml_indicators() {
        let info = FontInfo {
            family_name: "*Star".into(),
            style_name: "Regular".into(),
            ..Default::default()
        };
        let plan = VariationPlan::new(parse_axes("ESIZ").unwrap(), &[]).unwrap();
        let yaml = config_yaml(&designspace_file_name(&info), &plan).unwrap();

        let config: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config["sources"][0].as_str(), Some("*Star-Regular.designspace"));
        assert_eq!(config["axisOrder"][0].as_str(), Some("ESIZ"));
    }

    #[test]
    fn writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_designspace(dir.path(), &info(), &plan()).unwrap();
        assert_eq!(path, dir.path().join("Pixel-Sans-Bold.designspace"));
        assert!(path.exists());
        assert!(dir.path().join("config.yaml").exists());
    }
}
