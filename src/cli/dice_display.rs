use once_cell::sync::Lazy;

pub const FACE_WIDTH: usize = 9;
pub const FACE_HEIGHT: usize = 5;

// 3x3 pip grid per face, row-major.
const PIP_GRIDS: [[bool; 9]; 6] = [
    [
        false, false, false, //
        false, true, false, //
        false, false, false,
    ],
    [
        true, false, false, //
        false, false, false, //
        false, false, true,
    ],
    [
        true, false, false, //
        false, true, false, //
        false, false, true,
    ],
    [
        true, false, true, //
        false, false, false, //
        true, false, true,
    ],
    [
        true, false, true, //
        false, true, false, //
        true, false, true,
    ],
    [
        true, false, true, //
        true, false, true, //
        true, false, true,
    ],
];

static FACES: Lazy<[Vec<String>; 6]> = Lazy::new(|| PIP_GRIDS.map(render_face));

fn render_face(grid: [bool; 9]) -> Vec<String> {
    let pip = |on: bool| if on { '\u{25cf}' } else { ' ' };
    let mut lines = Vec::with_capacity(FACE_HEIGHT);
    lines.push(format!("\u{250c}{}\u{2510}", "\u{2500}".repeat(FACE_WIDTH - 2)));
    for row in 0..3 {
        lines.push(format!(
            "\u{2502} {} {} {} \u{2502}",
            pip(grid[row * 3]),
            pip(grid[row * 3 + 1]),
            pip(grid[row * 3 + 2]),
        ));
    }
    lines.push(format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(FACE_WIDTH - 2)));
    lines
}

/// The ASCII-art lines for a single face. Out-of-range values clamp rather
/// than panic; the reducer has already validated real rolls.
pub fn face_lines(value: u8) -> &'static [String] {
    &FACES[usize::from(value.clamp(1, 6)) - 1]
}

/// Lays several dice side by side, one string per terminal row.
pub fn render_values(values: &[u8]) -> Vec<String> {
    let mut rows = vec![String::new(); FACE_HEIGHT];
    for (idx, &value) in values.iter().enumerate() {
        for (row, line) in face_lines(value).iter().enumerate() {
            if idx > 0 {
                rows[row].push_str("  ");
            }
            rows[row].push_str(line);
        }
    }
    rows
}
