use crate::biomorph::Biomorph;
use std::f64::consts::PI;

/// Fraction by which each extent bound is expanded outward.
pub const DEFAULT_MARGIN: f64 = 0.1;

/// Every generated segment carries the same neutral grey; display layers
/// may re-theme it.
pub const LINE_COLOR: (u8, u8, u8) = (128, 128, 128);

/// One line segment in abstract space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub color: (u8, u8, u8),
}

/// Bounding box of a rendered biomorph, margin already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A biomorph expanded into line segments centred on (0, 0), ready for a
/// display layer to scale and translate onto a real surface.
#[derive(Debug, Clone)]
pub struct AbstractRender {
    pub lines: Vec<Line>,
    pub extent: Extent,
}

/// Evolving per-branch state. Passed by value so every recursion frame
/// owns its own copy; sibling branches never see each other's drift.
#[derive(Clone, Copy)]
struct BranchState {
    length_up: f64,
    length_down: f64,
    length_delta_up: f64,
    length_delta_down: f64,
    angle_up: f64,
    angle_down: f64,
    angle_delta_up: f64,
    angle_delta_down: f64,
    aspect: f64,
}

impl BranchState {
    fn from_biomorph(biomorph: &Biomorph) -> Self {
        Self {
            length_up: biomorph.branch_length_up(),
            length_down: biomorph.branch_length_down(),
            length_delta_up: biomorph.branch_length_delta_up(),
            length_delta_down: biomorph.branch_length_delta_down(),
            angle_up: biomorph.branch_angle_up(),
            angle_down: biomorph.branch_angle_down(),
            angle_delta_up: biomorph.branch_angle_delta_up(),
            angle_delta_down: biomorph.branch_angle_delta_down(),
            aspect: biomorph.aspect_ratio(),
        }
    }
}

/// A heading is downward inside [1.5pi, 2pi] or [0, 0.5pi], inclusive,
/// and upward everywhere else. Headings are deliberately never wrapped
/// into [0, 2pi); values outside that range classify as upward.
fn heading_up(heading: f64) -> bool {
    !((1.5 * PI..=2.0 * PI).contains(&heading) || (0.0..=0.5 * PI).contains(&heading))
}

/// Render a biomorph. The genes are read once up front and the biomorph
/// is never mutated; all drift happens in per-frame `BranchState` copies.
pub fn generate(biomorph: &Biomorph) -> AbstractRender {
    let mut lines = Vec::new();
    render_step(
        &mut lines,
        BranchState::from_biomorph(biomorph),
        biomorph.iterations(),
        (0.0, 0.0),
        PI,
    );
    let extent = find_extent(&lines, DEFAULT_MARGIN);
    AbstractRender { lines, extent }
}

fn render_step(
    lines: &mut Vec<Line>,
    mut state: BranchState,
    mut iterations: i32,
    origin: (f64, f64),
    heading: f64,
) {
    let up = heading_up(heading);

    let length = if up { state.length_up } else { state.length_down };
    let new_origin = push_line(lines, length, origin, heading, state.aspect);

    iterations -= 1;
    if iterations <= 0 {
        return;
    }

    // Fork headings use this level's angle; the delta drift only applies
    // from the children onward, and only to the side that matched.
    let angle = if up { state.angle_up } else { state.angle_down };
    let heading_left = heading - angle;
    let heading_right = heading + angle;

    if up {
        state.length_up += state.length_delta_up;
        state.angle_up += state.angle_delta_up;
    } else {
        state.length_down += state.length_delta_down;
        state.angle_down += state.angle_delta_down;
    }

    // Pre-order, left subtree first. Segment order is part of the
    // contract with display layers.
    render_step(lines, state, iterations, new_origin, heading_left);
    render_step(lines, state, iterations, new_origin, heading_right);
}

/// Append one segment along `heading` and return its endpoint. The
/// aspect ratio scales the whole target x coordinate, stretching or
/// squashing the shape horizontally while leaving y untouched.
fn push_line(
    lines: &mut Vec<Line>,
    length: f64,
    origin: (f64, f64),
    heading: f64,
    aspect: f64,
) -> (f64, f64) {
    let target_x = (origin.0 + length * heading.sin()) * aspect;
    let target_y = origin.1 + length * heading.cos();

    lines.push(Line {
        x0: origin.0,
        y0: origin.1,
        x1: target_x,
        y1: target_y,
        color: LINE_COLOR,
    });

    (target_x, target_y)
}

/// Pool min/max over every endpoint, then push each bound outward by
/// multiplying it by (1 + margin). The expansion is multiplicative on
/// the bound itself, not symmetric padding: negative bounds grow more
/// negative. An empty segment list yields the zero extent.
pub fn find_extent(lines: &[Line], margin: f64) -> Extent {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;

    for line in lines {
        let lo_x = line.x0.min(line.x1);
        let hi_x = line.x0.max(line.x1);
        let lo_y = line.y0.min(line.y1);
        let hi_y = line.y0.max(line.y1);

        bounds = Some(match bounds {
            None => (lo_x, lo_y, hi_x, hi_y),
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(lo_x),
                min_y.min(lo_y),
                max_x.max(hi_x),
                max_y.max(hi_y),
            ),
        });
    }

    match bounds {
        None => Extent::default(),
        Some((min_x, min_y, max_x, max_y)) => Extent {
            min_x: min_x * (1.0 + margin),
            min_y: min_y * (1.0 + margin),
            max_x: max_x * (1.0 + margin),
            max_y: max_y * (1.0 + margin),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomorph::Biomorph;

    /// Biomorph with the iterations gene stepped up to the given depth;
    /// every other gene stays at its first step.
    fn biomorph_with_depth(depth: i32) -> Biomorph {
        let mut b = Biomorph::new().unwrap();
        for _ in 1..depth {
            b.gene_mut(0).increment();
        }
        assert_eq!(b.iterations(), depth);
        b
    }

    fn plain_state() -> BranchState {
        BranchState {
            length_up: 0.0,
            length_down: 0.0,
            length_delta_up: 0.0,
            length_delta_down: 0.0,
            angle_up: 0.0,
            angle_down: 0.0,
            angle_delta_up: 0.0,
            angle_delta_down: 0.0,
            aspect: 1.0,
        }
    }

    #[test]
    fn heading_classification_boundaries() {
        assert!(!heading_up(0.0));
        assert!(!heading_up(0.5 * PI));
        assert!(heading_up(0.5 * PI + 1e-9));
        assert!(heading_up(PI));
        assert!(heading_up(1.5 * PI - 1e-9));
        assert!(!heading_up(1.5 * PI));
        assert!(!heading_up(2.0 * PI));
        // Unnormalized headings fall outside both downward intervals.
        assert!(heading_up(2.5 * PI));
        assert!(heading_up(-0.25 * PI));
    }

    #[test]
    fn one_iteration_draws_one_segment() {
        let render = generate(&biomorph_with_depth(1));
        assert_eq!(render.lines.len(), 1);
    }

    #[test]
    fn three_iterations_draw_full_binary_tree() {
        // Termination is purely depth-driven, so depth 3 always expands
        // to the full binary tree.
        let render = generate(&biomorph_with_depth(3));
        assert_eq!(render.lines.len(), 1 + 2 + 4);
    }

    #[test]
    fn trunk_points_straight_down_in_y() {
        // Heading pi is upward, so the up-length applies: one segment
        // from the origin to (10 sin pi, 10 cos pi) = (~0, -10).
        let mut state = plain_state();
        state.length_up = 10.0;

        let mut lines = Vec::new();
        render_step(&mut lines, state, 1, (0.0, 0.0), PI);

        assert_eq!(lines.len(), 1);
        let line = lines[0];
        assert_eq!((line.x0, line.y0), (0.0, 0.0));
        assert!(line.x1.abs() < 1e-9);
        assert!((line.y1 + 10.0).abs() < 1e-9);
    }

    #[test]
    fn aspect_ratio_scales_whole_target_x() {
        let mut state = plain_state();
        state.length_up = 10.0;
        state.aspect = 2.0;

        let mut lines = Vec::new();
        // Heading 0.75 pi is upward: raw target (10 sin, 10 cos), x
        // doubled by the aspect ratio, y untouched.
        render_step(&mut lines, state, 1, (0.0, 0.0), 0.75 * PI);

        let line = lines[0];
        let h = 0.75 * PI;
        assert!((line.x1 - 2.0 * 10.0 * h.sin()).abs() < 1e-9);
        assert!((line.y1 - 10.0 * h.cos()).abs() < 1e-9);
    }

    #[test]
    fn deltas_drift_only_the_matching_side() {
        // Straight-line degenerate tree: zero fork angle keeps every
        // heading at pi (upward), so only the up length drifts and each
        // depth adds the delta once.
        let mut state = plain_state();
        state.length_up = 10.0;
        state.length_delta_up = 5.0;
        state.length_down = 1.0;
        state.length_delta_down = 100.0;

        let mut lines = Vec::new();
        render_step(&mut lines, state, 3, (0.0, 0.0), PI);

        assert_eq!(lines.len(), 7);
        // Depth 0 trunk: length 10. Depth 1: 15. Depth 2: 20.
        assert!(((lines[0].y1 - lines[0].y0).abs() - 10.0).abs() < 1e-9);
        assert!(((lines[1].y1 - lines[1].y0).abs() - 15.0).abs() < 1e-9);
        assert!(((lines[2].y1 - lines[2].y0).abs() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn generation_leaves_biomorph_untouched() {
        let b = biomorph_with_depth(3);
        let before: Vec<u32> = (0..crate::biomorph::GENE_COUNT)
            .map(|i| b.gene(i).index())
            .collect();
        let first = generate(&b);
        let second = generate(&b);
        let after: Vec<u32> = (0..crate::biomorph::GENE_COUNT)
            .map(|i| b.gene(i).index())
            .collect();
        assert_eq!(before, after);
        assert_eq!(first.lines, second.lines, "generation is deterministic");
    }

    #[test]
    fn extent_margin_is_multiplicative_per_bound() {
        let lines = [Line {
            x0: 0.0,
            y0: 0.0,
            x1: 10.0,
            y1: -10.0,
            color: LINE_COLOR,
        }];
        let extent = find_extent(&lines, 0.1);
        assert!((extent.min_x - 0.0).abs() < 1e-9);
        assert!((extent.min_y + 11.0).abs() < 1e-9);
        assert!((extent.max_x - 11.0).abs() < 1e-9);
        assert!((extent.max_y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn empty_render_has_zero_extent() {
        assert_eq!(find_extent(&[], DEFAULT_MARGIN), Extent::default());
    }
}
