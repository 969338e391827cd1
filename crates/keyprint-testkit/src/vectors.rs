//! Golden test vectors for deterministic verification.
//!
//! Every renderer of these icons, on any platform, must agree with these
//! values exactly.

use anyhow::{bail, ensure, Context, Result};
use serde::Serialize;

use keyprint::generators::jdenticon::IconHash;
use keyprint::generators::{BlockiesGenerator, Cell, DotsGenerator, JdenticonGenerator};
use keyprint::{generate, Algorithm, Color, ImageFormat, PublicKey};

/// Icon size of the pinned SVG documents.
pub const SVG_SIZE: u32 = 64;

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The key as hex.
    pub hex: &'static str,
    /// The same key as an SS58 address.
    pub ss58: &'static str,
    /// Expected Dots scheme name.
    pub dots_scheme: &'static str,
    /// Expected Dots colors (RGB, all opaque), in template order.
    pub dots_colors: [(u8, u8, u8); 19],
    /// Expected 8×8 Blockies grid: `.` background, `P` primary, `S` spot.
    pub blockies_grid: [&'static str; 8],
    /// Expected Blockies background, primary and spot colors.
    pub blockies_colors: [(u8, u8, u8); 3],
    /// Expected Jdenticon hash digits.
    pub jdenticon_hash: &'static str,
    /// Expected Jdenticon side, corner and center colors.
    pub jdenticon_colors: [(u8, u8, u8); 3],
    /// Expected Dots SVG at [`SVG_SIZE`].
    pub dots_svg: &'static str,
    /// Expected Jdenticon SVG at [`SVG_SIZE`], default configuration.
    pub jdenticon_svg: &'static str,
}

/// The well-known "Alice" development key.
pub const ALICE: GoldenVector = GoldenVector {
    name: "alice",
    hex: "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
    ss58: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
    dots_scheme: "vmirror",
    dots_colors: [
        (165, 227, 156),
        (60, 40, 17),
        (184, 68, 202),
        (139, 39, 88),
        (135, 68, 202),
        (225, 156, 227),
        (139, 39, 88),
        (135, 68, 202),
        (184, 68, 202),
        (165, 227, 156),
        (60, 40, 17),
        (162, 202, 68),
        (39, 139, 139),
        (187, 202, 68),
        (38, 60, 17),
        (39, 139, 139),
        (187, 202, 68),
        (162, 202, 68),
        (61, 39, 139),
    ],
    blockies_grid: [
        "..S..S..",
        ".S.PP.S.",
        "P.PSSP.P",
        ".PS..SP.",
        "........",
        "...PP...",
        "...PP...",
        ".S....S.",
    ],
    blockies_colors: [(192, 242, 202), (158, 45, 210), (126, 27, 115)],
    jdenticon_hash: "bdbd805d4c8dbe9c16942dc1146539944f34675620748bcb12585e671205aef1",
    jdenticon_colors: [(153, 128, 50), (229, 229, 229), (204, 179, 102)],
    dots_svg: concat!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">"##,
        r##"<circle cx="32" cy="32" r="32" fill="#eeeeee"/>"##,
        r##"<path fill="#263c11" d="M47.8 32a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#278b8b" d="M47.8 44a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M47.8 20a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#3c2811" d="M27 20a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M27 44a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#3d278b" d="M27 32a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#8744ca" d="M16.6 26a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M16.6 38a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#8b2758" d="M6.2 20a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M6.2 44a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#a2ca44" d="M37.4 50a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M37.4 14a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#a5e39c" d="M27 8a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M27 56a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#b844ca" d="M16.6 14a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M16.6 50a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#bbca44" d="M37.4 38a5,5 0 1,1 10,0a5,5 0 1,1 -10,0M37.4 26a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"<path fill="#e19ce3" d="M6.2 32a5,5 0 1,1 10,0a5,5 0 1,1 -10,0"/>"##,
        r##"</svg>"##,
    ),
    jdenticon_svg: concat!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">"##,
        r##"<path fill="#998032" d="M21.2 12.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M34.2 12.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M34.2 51.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M21.2 51.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M8.2 25.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M47.2 25.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M47.2 38.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0M8.2 38.5a4.3,4.3 0 1,1 8.7,0a4.3,4.3 0 1,1 -8.7,0"/>"##,
        r##"<path fill="#ccb366" d="M24.2 32a7.8,7.8 0 1,1 15.6,0a7.8,7.8 0 1,1 -15.6,0"/>"##,
        r##"<path fill="#e5e5e5" d="M19 19L6 19L6 6ZM45 19L45 6L58 6ZM45 45L58 45L58 58ZM19 45L19 58L6 58Z"/>"##,
        r##"</svg>"##,
    ),
};

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![ALICE]
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Background => '.',
        Cell::Primary => 'P',
        Cell::Spot => 'S',
    }
}

/// Check one vector against the generators.
pub fn verify_vector(vector: &GoldenVector) -> Result<()> {
    let key = PublicKey::Hex(vector.hex.to_string())
        .decode()
        .with_context(|| format!("{}: hex key", vector.name))?;
    let ss58 = PublicKey::Base58(vector.ss58.to_string())
        .decode()
        .with_context(|| format!("{}: ss58 key", vector.name))?;
    ensure!(key == ss58, "{}: hex and ss58 decode differently", vector.name);

    let dots = DotsGenerator::new();
    let scheme = dots.scheme(&key).name;
    ensure!(
        scheme == vector.dots_scheme,
        "{}: dots scheme {} != {}",
        vector.name,
        scheme,
        vector.dots_scheme
    );
    for (i, (actual, &(r, g, b))) in dots.colors(&key).iter().zip(&vector.dots_colors).enumerate() {
        if *actual != Color::rgb(r, g, b) {
            bail!("{}: dots color {} is {:?}, expected ({}, {}, {})", vector.name, i, actual, r, g, b);
        }
    }

    let (colors, grid) = BlockiesGenerator::default().draw(&key);
    let roles = [
        ("background", colors.background),
        ("primary", colors.primary),
        ("spot", colors.spot),
    ];
    for ((role, actual), &(r, g, b)) in roles.iter().zip(&vector.blockies_colors) {
        if *actual != Color::rgb(r, g, b) {
            bail!("{}: blockies {} is {:?}, expected ({}, {}, {})", vector.name, role, actual, r, g, b);
        }
    }
    for (row, expected) in vector.blockies_grid.iter().enumerate() {
        let actual: String = grid.row(row).iter().map(|&c| cell_char(c)).collect();
        ensure!(
            actual == *expected,
            "{}: blockies row {} is {}, expected {}",
            vector.name,
            row,
            actual,
            expected
        );
    }

    let hash = IconHash::of(&key);
    ensure!(
        hash.as_str() == vector.jdenticon_hash,
        "{}: jdenticon hash {} != {}",
        vector.name,
        hash.as_str(),
        vector.jdenticon_hash
    );
    let jdenticon = JdenticonGenerator::default().colors(&key);
    for (i, (actual, &(r, g, b))) in jdenticon.iter().zip(&vector.jdenticon_colors).enumerate() {
        if *actual != Color::rgb(r, g, b) {
            bail!("{}: jdenticon color {} is {:?}, expected ({}, {}, {})", vector.name, i, actual, r, g, b);
        }
    }

    let hex = PublicKey::Hex(vector.hex.to_string());
    for (algorithm, expected) in [
        (Algorithm::Dots, vector.dots_svg),
        (Algorithm::Jdenticon, vector.jdenticon_svg),
    ] {
        let image = generate(&hex, algorithm, SVG_SIZE, ImageFormat::Vector)
            .with_context(|| format!("{}: {} svg", vector.name, algorithm))?;
        let markup = image.as_vector().map(|doc| doc.as_str()).unwrap_or_default();
        ensure!(
            markup == expected,
            "{}: {} svg differs\n  actual: {}\nexpected: {}",
            vector.name,
            algorithm,
            markup,
            expected
        );
    }
    Ok(())
}

/// Verify that every vector matches.
pub fn verify_all_vectors() -> Result<()> {
    for vector in all_vectors() {
        verify_vector(&vector)?;
    }
    Ok(())
}

/// All vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&all_vectors())?)
}
