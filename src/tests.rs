#[cfg(test)]
mod conversion_tests {
    use crate::compose::CompositionOutcome;
    use crate::core::cli::CliArgs;
    use crate::core::config::ConversionSettings;
    use crate::core::runner::convert;
    use crate::data::ufo::load_ufo_from_path;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Eight pixel font with an accented letter that matches its parts
    /// (Aacute) and one with a stray pixel (Agrave)
    const FONT: &str = r#"STARTFONT 2.1
FONT -Test-Tiny-Medium-R-Normal--8-80-75-75-C-60-ISO10646-1
SIZE 8 75 75
FONTBOUNDINGBOX 6 8 0 -2
STARTPROPERTIES 3
FAMILY_NAME "Tiny"
FONT_ASCENT 6
FONT_DESCENT 2
ENDPROPERTIES
CHARS 5
STARTCHAR A
ENCODING 65
DWIDTH 6 0
BBX 5 3 0 0
BITMAP
20
50
F8
ENDCHAR
STARTCHAR Agrave
ENCODING 192
DWIDTH 6 0
BBX 5 5 0 0
BITMAP
48
00
20
50
F8
ENDCHAR
STARTCHAR Aacute
ENCODING 193
DWIDTH 6 0
BBX 5 5 0 0
BITMAP
20
00
20
50
F8
ENDCHAR
STARTCHAR gravecomb
ENCODING 768
DWIDTH 6 0
BBX 1 1 1 4
BITMAP
80
ENDCHAR
STARTCHAR acutecomb
ENCODING 769
DWIDTH 6 0
BBX 1 1 2 4
BITMAP
80
ENDCHAR
ENDFONT
"#;

    fn settings(dir: &Path, output: &str, extra: &[&str]) -> ConversionSettings {
        let input = dir.join("tiny.bdf");
        fs::write(&input, FONT).unwrap();
        let mut args = vec![
            "pixfont".to_string(),
            input.display().to_string(),
            dir.join(output).display().to_string(),
        ];
        args.extend(extra.iter().map(|arg| arg.to_string()));
        let cli = <CliArgs as clap::Parser>::parse_from(args);
        ConversionSettings::resolve(&cli, None).unwrap()
    }

    fn glif_files(ufo: &Path) -> Vec<(PathBuf, String)> {
        let mut files: Vec<_> = fs::read_dir(ufo.join("glyphs"))
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                let contents = fs::read_to_string(&path).unwrap();
                (PathBuf::from(path.file_name().unwrap()), contents)
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn static_conversion_composes_aacute() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), "out", &[]);
        let report = convert(&settings).unwrap();

        assert_eq!(report.font_name, "Tiny Regular");
        assert_eq!(report.summary.composed, 1);
        assert_eq!(report.summary.mismatch, 1);
        assert_eq!(report.designspace, None);
        assert_eq!(report.ufos, vec![dir.path().join("out").join("Tiny-Regular.ufo")]);

        let font = load_ufo_from_path(&report.ufos[0]).unwrap();
        let layer = font.default_layer();

        let aacute = layer.get_glyph("Aacute").unwrap();
        assert!(aacute.contours.is_empty());
        let bases: Vec<_> = aacute.components.iter().map(|c| c.base.as_str()).collect();
        assert_eq!(bases, vec!["A", "acutecomb"]);
        assert_eq!(aacute.components[1].transform.x_offset, 0.0);
        assert_eq!(aacute.components[1].transform.y_offset, 0.0);
        assert_eq!(aacute.width, 768.0);

        // 1024 units per em over 8 pixels; the acute sits at row 4, column 2
        for name in ["A", "acutecomb"] {
            let anchor = &layer.get_glyph(name).unwrap().anchors[0];
            assert_eq!(anchor.name.as_ref().map(|n| n.as_str()), Some("top.shifted"));
            assert_eq!((anchor.x, anchor.y), (256.0, 512.0));
        }

        // Agrave has a pixel that neither part explains
        let agrave = layer.get_glyph("Agrave").unwrap();
        assert!(agrave.components.is_empty());
        assert!(!agrave.contours.is_empty());
        assert!(layer.get_glyph("gravecomb").unwrap().anchors.is_empty());

        assert!(font
            .features
            .contains("markClass [acutecomb] <anchor 256 512> @top.shifted;"));
        assert!(font
            .features
            .contains("pos base [A] <anchor 256 512> mark @top.shifted;"));
        assert!(font.features.contains("@allmarks = [gravecomb acutecomb];"));
    }

    #[test]
    fn subset_drops_components() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), "out", &["--codepoints", "0x41,0xc1"]);
        let report = convert(&settings).unwrap();

        assert_eq!(report.summary.composed, 0);
        assert_eq!(report.summary.missing, 1);
        let font = load_ufo_from_path(&report.ufos[0]).unwrap();
        assert!(font.default_layer().get_glyph("acutecomb").is_none());
        assert!(font.default_layer().get_glyph("Aacute").unwrap().components.is_empty());
    }

    #[test]
    fn variable_conversion_writes_masters_and_designspace() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(
            dir.path(),
            "out",
            &["--axes", "ESIZ,ROND", "--instance", "Dots:ESIZ=85,ROND=80"],
        );
        let report = convert(&settings).unwrap();

        let names: Vec<_> = report
            .ufos
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "Tiny-Regular-Thin-Square.ufo",
                "Tiny-Regular-Thick-Square.ufo",
                "Tiny-Regular-Thin-Round.ufo",
                "Tiny-Regular-Thick-Round.ufo",
            ]
        );
        let designspace = report.designspace.unwrap();
        assert_eq!(designspace.file_name().unwrap(), "Tiny-Regular.designspace");
        assert!(designspace.exists());
        let config = fs::read_to_string(dir.path().join("out").join("config.yaml")).unwrap();
        let config: serde_yaml::Value = serde_yaml::from_str(&config).unwrap();
        assert_eq!(config["axisOrder"][0].as_str(), Some("ESIZ"));
        assert_eq!(config["axisOrder"][1].as_str(), Some("ROND"));

        // One 16-point element per ink pixel, identical in every master
        let point_counts = |path: &PathBuf| {
            let font = load_ufo_from_path(path).unwrap();
            let a = font.default_layer().get_glyph("A").unwrap();
            a.contours.iter().map(|c| c.points.len()).collect::<Vec<_>>()
        };
        let first = point_counts(&report.ufos[0]);
        assert_eq!(first, vec![16; 8]);
        for ufo in &report.ufos[1..] {
            assert_eq!(point_counts(ufo), first);
        }
    }

    #[test]
    fn jitter_is_reproducible_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let extra = ["--axes", "EJIT", "--jitter-seed", "7"];
        let first = convert(&settings(dir.path(), "first", &extra)).unwrap();
        let second = convert(&settings(dir.path(), "second", &extra)).unwrap();

        assert_eq!(first.ufos.len(), 2);
        for (a, b) in first.ufos.iter().zip(&second.ufos) {
            assert_eq!(glif_files(a), glif_files(b));
        }
        // the steady and jittery masters differ
        assert_ne!(glif_files(&first.ufos[0]), glif_files(&first.ufos[1]));
    }

    #[test]
    fn rerun_replaces_output() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), "out", &[]);
        let first = convert(&settings).unwrap();
        let stray = first.ufos[0].join("glyphs").join("stray.glif");
        fs::write(&stray, "").unwrap();

        convert(&settings).unwrap();
        assert!(!stray.exists());
    }

    #[test]
    fn outcomes_match_bitmaps() {
        use crate::compose::compose;
        use crate::font_source::bdf::BdfFont;
        use crate::font_source::codepoints::CodepointSubset;
        use crate::font_source::repository::GlyphRepository;
        use crate::unicode::decomposition::DecompositionResolver;

        let font = BdfFont::parse(FONT).unwrap();
        let repository = GlyphRepository::from_bdf(&font, &CodepointSubset::all());
        let composition = compose(&repository, &DecompositionResolver::default());

        assert_eq!(composition.outcome("A"), Some(CompositionOutcome::Atomic));
        assert_eq!(composition.outcome("Aacute"), Some(CompositionOutcome::Composed));
        assert_eq!(composition.outcome("Agrave"), Some(CompositionOutcome::Mismatch));
    }
}

#[cfg(test)]
mod composition_properties {
    use crate::compose::{compose, CompositionOutcome, GlyphPlan};
    use crate::font_source::bitmap::{Bitmap, PixelOffset};
    use crate::font_source::glyph::Glyph;
    use crate::font_source::repository::GlyphRepository;
    use crate::unicode::decomposition::{
        DecompositionResolver, DecompositionSource, DecompositionTag, RawDecomposition,
    };
    use proptest::prelude::*;

    struct Table(Vec<(u32, Vec<u32>)>);

    impl DecompositionSource for Table {
        fn decomposition(&self, codepoint: u32) -> Option<RawDecomposition> {
            self.0
                .iter()
                .find(|(composite, _)| *composite == codepoint)
                .map(|(_, mapping)| RawDecomposition {
                    tag: DecompositionTag::Canonical,
                    mapping: mapping.clone(),
                })
        }
    }

    fn resolver(table: Vec<(u32, Vec<u32>)>) -> DecompositionResolver<Table> {
        DecompositionResolver::new(|_| None, Table(table))
    }

    /// Cropped bitmaps up to the given size, always with ink at the origin
    fn bitmap(max_width: usize, max_height: usize) -> impl Strategy<Value = Bitmap> {
        (1..=max_width, 1..=max_height).prop_flat_map(|(width, height)| {
            prop::collection::vec(any::<bool>(), width * height).prop_map(move |cells| {
                let mut bitmap = Bitmap::new(width, height);
                for (index, ink) in cells.into_iter().enumerate() {
                    if ink {
                        bitmap.set(index / width, index % width, true);
                    }
                }
                bitmap.set(0, 0, true);
                bitmap.crop().0
            })
        })
    }

    /// A base, a mark and where the mark sits over the base
    fn base_and_mark() -> impl Strategy<Value = (Bitmap, Bitmap, PixelOffset)> {
        (bitmap(5, 5), bitmap(3, 2)).prop_flat_map(|(base, mark)| {
            let rows = 0..=base.height() as i32 + 1;
            let cols = 0..=base.width() as i32;
            (Just(base), Just(mark), rows, cols)
                .prop_map(|(base, mark, row, col)| (base, mark, PixelOffset::new(row, col)))
        })
    }

    /// Overlay `parts` (bitmap, absolute offset) and crop to the ink
    fn overlay(parts: &[(&Bitmap, PixelOffset)]) -> (Bitmap, PixelOffset) {
        let width = parts
            .iter()
            .map(|(bitmap, at)| at.col as usize + bitmap.width())
            .max()
            .unwrap_or(1);
        let height = parts
            .iter()
            .map(|(bitmap, at)| at.row as usize + bitmap.height())
            .max()
            .unwrap_or(1);
        let mut canvas = Bitmap::new(width, height);
        for (bitmap, at) in parts {
            for (row, col) in bitmap.ink_pixels() {
                canvas.set(at.row as usize + row, at.col as usize + col, true);
            }
        }
        canvas.crop()
    }

    proptest! {
        #[test]
        fn placements_reproduce_random_composites((base, mark, mark_at) in base_and_mark()) {
            let (composite, composite_at) =
                overlay(&[(&base, PixelOffset::ZERO), (&mark, mark_at)]);

            let repository = GlyphRepository::new(vec![
                Glyph::new("A", 0x41, base, PixelOffset::ZERO, 6),
                Glyph::new("Aacute", 0xc1, composite, composite_at, 6),
                Glyph::new("acutecomb", 0x301, mark, mark_at, 6),
            ]);
            let composition = compose(&repository, &resolver(vec![(0xc1, vec![0x41, 0x301])]));
            prop_assert_eq!(composition.outcome("Aacute"), Some(CompositionOutcome::Composed));

            let GlyphPlan::Components(placements) = composition.plan("Aacute") else {
                panic!("Aacute should be composed");
            };
            let target = repository.get("Aacute").unwrap();
            let mut canvas = Bitmap::blank_like(&target.bitmap);
            for placement in placements {
                let component = repository.get(&placement.glyph).unwrap();
                prop_assert!(canvas.paint_within(
                    &component.bitmap,
                    placement.offset - target.offset,
                    &target.bitmap
                ));
            }
            prop_assert_eq!(&canvas, &target.bitmap);
        }

        #[test]
        fn extra_pixel_is_never_composed(base in bitmap(4, 4)) {
            let mark = Bitmap::from_art(&["#"]);
            let mark_at = PixelOffset::new(base.height() as i32 + 1, 0);
            // a pixel two columns right of the mark, on a row no part reaches
            let stray = Bitmap::from_art(&["#"]);
            let stray_at = PixelOffset::new(base.height() as i32 + 3, 2);
            let (composite, composite_at) = overlay(&[
                (&base, PixelOffset::ZERO),
                (&mark, mark_at),
                (&stray, stray_at),
            ]);

            let repository = GlyphRepository::new(vec![
                Glyph::new("A", 0x41, base, PixelOffset::ZERO, 6),
                Glyph::new("Agrave", 0xc0, composite, composite_at, 6),
                Glyph::new("gravecomb", 0x300, mark, mark_at, 6),
            ]);
            let composition = compose(&repository, &resolver(vec![(0xc0, vec![0x41, 0x300])]));
            prop_assert_eq!(composition.outcome("Agrave"), Some(CompositionOutcome::Mismatch));
            prop_assert!(composition.anchors.anchors("A").is_none());
        }
    }

    #[test]
    fn composition_is_deterministic() {
        let build = || {
            let repository = GlyphRepository::new(vec![
                Glyph::new("A", 0x41, Bitmap::from_art(&[".#.", "###"]), PixelOffset::ZERO, 4),
                Glyph::new(
                    "Aacute",
                    0xc1,
                    Bitmap::from_art(&["#..", "...", ".#.", "###"]),
                    PixelOffset::ZERO,
                    4,
                ),
                Glyph::new("acutecomb", 0x301, Bitmap::from_art(&["#"]), PixelOffset::new(3, 0), 4),
            ]);
            let composition = compose(&repository, &resolver(vec![(0xc1, vec![0x41, 0x301])]));
            (
                composition.plan("Aacute").clone(),
                composition.anchors.anchors("A").cloned(),
                composition.anchors.groups(&repository),
            )
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn first_anchor_wins_and_conflicts_are_counted() {
        let repository = GlyphRepository::new(vec![
            Glyph::new("A", 0x41, Bitmap::from_art(&["###"]), PixelOffset::ZERO, 4),
            Glyph::new("acutecomb", 0x301, Bitmap::from_art(&["#"]), PixelOffset::new(2, 1), 4),
            // acute over the middle
            Glyph::new("Aacute", 0xc1, Bitmap::from_art(&[".#.", "...", "###"]), PixelOffset::ZERO, 4),
            // acute over the right edge
            Glyph::new("Acircumflex", 0xc2, Bitmap::from_art(&["..#", "...", "###"]), PixelOffset::ZERO, 4),
        ]);
        let composition = compose(
            &repository,
            &resolver(vec![(0xc1, vec![0x41, 0x301]), (0xc2, vec![0x41, 0x301])]),
        );

        assert_eq!(composition.summary.composed, 2);
        assert_eq!(composition.summary.anchor_conflicts, 1);
        let anchors = composition.anchors.anchors("A").unwrap();
        assert_eq!(anchors.values().copied().collect::<Vec<_>>(), vec![PixelOffset::new(2, 1)]);
        let conflict = &composition.anchors.conflicts()[0];
        assert_eq!(conflict.composite, 0xc2);
        assert_eq!(conflict.derived, PixelOffset::new(2, 2));
    }
}
