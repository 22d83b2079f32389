//! OpenType feature code
//!
//! Writes the mark attachment rules derived from the anchor groups as
//! AFDKO feature syntax, stored in each UFO's `features.fea`.

use crate::compose::AnchorGroups;
use crate::font_source::bitmap::PixelOffset;
use crate::font_source::repository::GlyphRepository;
use crate::geometry::PixelGrid;
use crate::unicode::marks::combining_mark;

const LOOKUP_NAME: &str = "marklookup";

/// Script tags declared when the font covers their key letter
const SCRIPTS: [(u32, &str); 3] = [(0x41, "latn"), (0x391, "grek"), (0x410, "cyrl")];

/// Build the feature file for one master
pub fn feature_text(repository: &GlyphRepository, groups: &AnchorGroups, grid: &PixelGrid) -> String {
    let anchor = |position: &PixelOffset| {
        let point = grid
            .to_units(f64::from(position.col), f64::from(position.row))
            .round();
        format!("<anchor {} {}>", point.x, point.y)
    };

    let mut lines = vec!["languagesystem DFLT dflt;".to_string()];
    for (codepoint, script) in SCRIPTS {
        if repository.contains_codepoint(codepoint) {
            lines.push(format!("languagesystem {script} dflt;"));
        }
    }
    lines.push(String::new());

    let mut all_marks = Vec::new();
    let mut top_marks = Vec::new();
    for glyph in repository.iter() {
        if let Some(mark) = combining_mark(glyph.codepoint) {
            all_marks.push(glyph.name.as_str());
            if mark.role.is_top() {
                top_marks.push(glyph.name.as_str());
            }
        }
    }
    lines.push(format!("@allmarks = [{}];", all_marks.join(" ")));
    lines.push(format!("@topmarks = [{}];", top_marks.join(" ")));
    lines.push(String::new());

    if !groups.mark_classes.is_empty() && !groups.base_classes.is_empty() {
        lines.push(format!("lookup {LOOKUP_NAME} {{"));
        for ((role, position), glyphs) in &groups.mark_classes {
            lines.push(format!(
                "    markClass [{}] {} @{};",
                glyphs.join(" "),
                anchor(position),
                role
            ));
        }
        for (anchors, glyphs) in &groups.base_classes {
            let marks: Vec<String> = anchors
                .iter()
                .map(|(role, position)| format!("{} mark @{}", anchor(position), role))
                .collect();
            lines.push(format!("    pos base [{}] {};", glyphs.join(" "), marks.join(" ")));
        }
        lines.push(format!("}} {LOOKUP_NAME};"));
        lines.push(String::new());

        lines.push("feature mark {".to_string());
        lines.push(format!("    lookup {LOOKUP_NAME};"));
        lines.push("} mark;".to_string());
        lines.push(String::new());
    }

    lines.push("table GDEF {".to_string());
    lines.push("    GlyphClassDef , , @allmarks, ;".to_string());
    lines.push("} GDEF;".to_string());

    let mut fea = lines.join("\n");
    fea.push('\n');
    fea
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{AnchorSynthesizer, Placement};
    use crate::font_source::bitmap::Bitmap;
    use crate::font_source::glyph::Glyph;
    use kurbo::Vec2;
    use pretty_assertions::assert_eq;

    fn glyph(name: &str, codepoint: u32, offset: PixelOffset) -> Glyph {
        Glyph::new(name, codepoint, Bitmap::from_art(&["#"]), offset, 2)
    }

    #[test]
    fn mark_lookup_and_classes() {
        let repository = GlyphRepository::new(vec![
            glyph("A", 0x41, PixelOffset::ZERO),
            glyph("gravecomb", 0x300, PixelOffset::new(2, 0)),
            glyph("dotbelowcomb", 0x323, PixelOffset::new(-2, 0)),
            glyph("Agrave", 0xc0, PixelOffset::ZERO),
        ]);
        let mut anchors = AnchorSynthesizer::new();
        anchors.add(
            &repository,
            repository.get("Agrave").unwrap(),
            &[
                Placement::new("A", PixelOffset::ZERO),
                Placement::new("gravecomb", PixelOffset::new(2, 0)),
            ],
        );
        let grid = PixelGrid::new(100.0, 1.0, Vec2::ZERO);
        let fea = feature_text(&repository, &anchors.groups(&repository), &grid);

        assert_eq!(
            fea,
            "languagesystem DFLT dflt;\n\
             languagesystem latn dflt;\n\
             \n\
             @allmarks = [gravecomb dotbelowcomb];\n\
             @topmarks = [gravecomb];\n\
             \n\
             lookup marklookup {\n    \
             markClass [gravecomb] <anchor 0 200> @top;\n    \
             pos base [A] <anchor 0 200> mark @top;\n\
             } marklookup;\n\
             \n\
             feature mark {\n    \
             lookup marklookup;\n\
             } mark;\n\
             \n\
             table GDEF {\n    \
             GlyphClassDef , , @allmarks, ;\n\
             } GDEF;\n"
        );
    }

    #[test]
    fn no_lookup_without_anchors() {
        let repository = GlyphRepository::new(vec![glyph("alpha", 0x3b1, PixelOffset::ZERO)]);
        let grid = PixelGrid::new(100.0, 1.0, Vec2::ZERO);
        let fea = feature_text(&repository, &AnchorGroups::default(), &grid);
        assert!(fea.starts_with("languagesystem DFLT dflt;\n\n"));
        assert!(!fea.contains("lookup"));
        assert!(fea.contains("@allmarks = [];"));
        assert!(fea.ends_with("\n\ntable GDEF {\n    GlyphClassDef , , @allmarks, ;\n} GDEF;\n"));
    }
}
