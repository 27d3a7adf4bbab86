//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use identicon_core::{
    hashing::sha256_hex,
    render::Layout,
    HashAlgorithm, Identicon, IdenticonConfig, IdenticonError, Rgb,
};

#[derive(Deserialize)]
struct Golden {
    input: String,
    config: IdenticonConfig,
    digest: String,
    grid: Vec<String>,
    foreground: Rgb,
    buffer_sha256: String,
}

fn load_golden(name: &str) -> Golden {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden").join(name);
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn check_golden(name: &str) {
    let golden = load_golden(name);
    let identicon = Identicon::new(golden.config.clone());

    let sprite = identicon.derive(&golden.input).unwrap();
    assert_eq!(sprite.digest, golden.digest);
    assert_eq!(sprite.grid.to_strings(), golden.grid);
    assert_eq!(sprite.foreground, golden.foreground);

    let img = identicon.generate(&golden.input).unwrap();
    assert_eq!(img.dimensions(), (golden.config.size, golden.config.size));
    assert_eq!(sha256_hex(img.as_raw()), golden.buffer_sha256);
}

#[test]
fn golden_hello_md5_default() {
    check_golden("hello_md5_dim5.json");
}

#[test]
fn golden_hello_sha256_dim7() {
    check_golden("hello_sha256_dim7.json");
}

#[test]
fn golden_hello_md5_dim4() {
    check_golden("hello_md5_dim4.json");
}

#[test]
fn golden_hello_md5_dim3_wraps_color_read() {
    check_golden("hello_md5_dim3.json");
}

#[test]
fn invariant_color_read_needs_wrappable_nibbles() {
    let sprite = Identicon::new(IdenticonConfig { dim: 3, size: 60, ..Default::default() })
        .derive("hello")
        .unwrap();
    assert_eq!(sprite.foreground, Rgb::new(224, 145, 133));

    for dim in [1, 2] {
        let err = Identicon::new(IdenticonConfig { dim, ..Default::default() })
            .generate("hello")
            .unwrap_err();
        assert!(matches!(err, IdenticonError::InvalidConfig(_)), "dim {dim}");
    }
}

#[test]
fn invariant_default_layout_pixels() {
    // "hello": row 0 is "##.##", foreground (208,119,116)
    let img = Identicon::default().generate("hello").unwrap();
    let fg = image::Rgb([208, 119, 116]);
    let bg = image::Rgb([240, 240, 240]);

    let layout = Layout::new(500, 5);
    assert_eq!(layout, Layout { cell_size: 83, margin: 41 });

    assert_eq!(*img.get_pixel(40, 40), bg);
    assert_eq!(*img.get_pixel(41, 41), fg);
    assert_eq!(*img.get_pixel(123, 123), fg);
    // column 2 of row 0 is empty
    assert_eq!(*img.get_pixel(41 + 2 * 83, 41), bg);
    assert_eq!(*img.get_pixel(499, 499), bg);
}

#[test]
fn invariant_deterministic() {
    let identicon = Identicon::default();
    for input in ["", "hello", "user@example.com", "ünïcödé"] {
        let a = identicon.generate(input).unwrap();
        let b = identicon.generate(input).unwrap();
        assert_eq!(a.as_raw(), b.as_raw(), "input {input:?}");
    }
}

#[test]
fn invariant_mirror_symmetry() {
    for hash in HashAlgorithm::ALL {
        for dim in [4, 5, 6, 7, 8] {
            let identicon = Identicon::new(IdenticonConfig { dim, hash, size: 90, ..Default::default() });
            for input in ["a", "b", "hello", "identicon"] {
                let sprite = identicon.derive(input).unwrap();
                let grid = &sprite.grid;
                assert!(grid.is_mirror_symmetric());
                for row in 0..grid.dim() {
                    for col in 0..grid.dim() {
                        assert_eq!(grid.get(row, col), grid.get(row, grid.dim() - 1 - col));
                    }
                }

                // the image is symmetric too, up to the cell-aligned width
                let img = identicon.generate(input).unwrap();
                let layout = Layout::new(90, dim);
                let left = layout.margin;
                let right = layout.margin + layout.cell_size * dim - 1;
                for y in 0..90 {
                    for dx in 0..=(right - left) {
                        assert_eq!(img.get_pixel(left + dx, y), img.get_pixel(right - dx, y));
                    }
                }
            }
        }
    }
}

#[test]
fn invariant_nib_budget() {
    let nibs = |dim| IdenticonConfig { dim, ..Default::default() }.nib_count();
    assert_eq!(nibs(5), 32);
    assert_eq!(nibs(4), 8);
    assert_eq!(nibs(7), 28);
}

#[test]
fn invariant_digest_too_short() {
    let identicon = Identicon::new(IdenticonConfig { dim: 100, ..Default::default() });
    let err = identicon.generate("hello").unwrap_err();
    assert!(matches!(err, IdenticonError::DigestTooShort { algorithm: HashAlgorithm::Md5, .. }));
    assert!(err.to_string().contains("2500.0 bytes"));

    // sha512 has 128 nibbles: dim 15 needs 120, dim 16 needs 128, dim 17 needs 153
    for (dim, ok) in [(15, true), (16, true), (17, false)] {
        let config = IdenticonConfig { dim, hash: HashAlgorithm::Sha512, ..Default::default() };
        assert_eq!(Identicon::new(config).generate("hello").is_ok(), ok, "dim {dim}");
    }
}

#[test]
fn invariant_unsupported_hash() {
    let err = "sha1".parse::<HashAlgorithm>().unwrap_err();
    assert!(matches!(err, IdenticonError::UnsupportedHashKind(_)));
    assert!(err.to_string().contains("sha1"));

    let parsed: Result<IdenticonConfig, _> = serde_json::from_str(r#"{"hash": "sha1"}"#);
    assert!(parsed.is_err());
}

#[test]
fn invariant_override_precedence() {
    let fg = Rgb::new(10, 20, 30);
    for input in ["hello", "world", "x"] {
        let config = IdenticonConfig { foreground: Some(fg), ..Default::default() };
        let identicon = Identicon::new(config);
        let sprite = identicon.derive(input).unwrap();
        assert_eq!(sprite.foreground, fg);

        let img = identicon.generate(input).unwrap();
        let derived = Identicon::default().derive(input).unwrap().foreground;
        for pixel in img.pixels() {
            assert!(pixel.0 == fg.0 || pixel.0 == [240, 240, 240]);
            assert_ne!(pixel.0, derived.0);
        }
        let painted = img.pixels().filter(|p| p.0 == fg.0).count();
        assert_eq!(painted, sprite.grid.painted_cells().count() * 83 * 83);
    }
}

#[test]
fn invariant_custom_background() {
    let bg = Rgb::new(0, 0, 0);
    let img = Identicon::new(IdenticonConfig { background: bg, ..Default::default() })
        .generate("hello")
        .unwrap();
    assert_eq!(img.get_pixel(0, 0).0, bg.0);
}

#[test]
fn invariant_no_buffer_on_error() {
    let config = IdenticonConfig { dim: 0, ..Default::default() };
    let err = Identicon::new(config).generate("hello").unwrap_err();
    assert!(matches!(err, IdenticonError::InvalidConfig(_)));
}

#[test]
fn invariant_small_size_still_generates() {
    let identicon = Identicon::new(IdenticonConfig { size: 4, ..Default::default() });
    let img = identicon.generate("hello").unwrap();
    assert_eq!(img.dimensions(), (4, 4));
    assert!(img.pixels().all(|p| p.0 == [240, 240, 240]));
}

#[test]
fn invariant_shared_across_threads() {
    let identicon = Identicon::default();
    let expected = identicon.generate("hello").unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| identicon.generate("hello").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_raw(), expected.as_raw());
        }
    });
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identicon.json");
    fs::write(&path, r#"{"size": 64, "dim": 7, "hash": "sha256"}"#).unwrap();

    let config = IdenticonConfig::load_from_file(&path).unwrap();
    let golden = load_golden("hello_sha256_dim7.json");
    assert_eq!(config, golden.config);

    let missing = IdenticonConfig::load_from_file(&dir.path().join("missing.json"));
    assert!(matches!(missing, Err(IdenticonError::Io(_))));

    fs::write(&path, "{not json").unwrap();
    assert!(matches!(IdenticonConfig::load_from_file(&path), Err(IdenticonError::Serialization(_))));
}

#[test]
fn saved_png_decodes_to_same_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.png");

    let img = Identicon::default().generate("hello").unwrap();
    img.save(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.as_raw(), img.as_raw());
}
