//! Shot-size variety rule.
//!
//! A single forward scan tracks the run of equal shot sizes ending at each
//! position. When a run grows past the limit, the entry before the current
//! one is swapped with the nearest later entry of a different size inside
//! the lookahead window. Pinned entries keep their position: they are never
//! swapped or chosen as partners. Without a usable partner the entry is
//! reframed to the closest other size the style allows. Entries are never
//! dropped, and the scan never moves backwards.

use serde::{Deserialize, Serialize};

use crate::shot::ShotSize;

/// Anything the variety pass can reorder or reframe.
pub trait ShotSlot {
    fn shot_size(&self) -> ShotSize;
    fn set_shot_size(&mut self, size: ShotSize);
    fn label(&self) -> &str;
    /// Pinned entries may be reframed but never moved.
    fn pinned(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Repair {
    Swap {
        position: usize,
        with: usize,
        moved: String,
        into_place: String,
    },
    Reframe {
        position: usize,
        scene: String,
        from: ShotSize,
        to: ShotSize,
    },
    /// The style allows a single shot size; the run cannot be broken.
    Unresolved { position: usize, size: ShotSize },
}

impl Repair {
    pub fn describe(&self) -> String {
        match self {
            Repair::Swap {
                position,
                with,
                moved,
                into_place,
            } => format!(
                "swapped '{moved}' (position {position}) with '{into_place}' (position {with}) to break a shot-size run"
            ),
            Repair::Reframe {
                position,
                scene,
                from,
                to,
            } => format!(
                "reframed '{scene}' (position {position}) from {from} to {to}; no swap partner in range"
            ),
            Repair::Unresolved { position, size } => {
                format!("run of {size} ending at position {position} left as-is; style allows no other size")
            }
        }
    }
}

fn run_length_ending_at<T: ShotSlot>(items: &[T], i: usize, cap: usize) -> usize {
    let size = items[i].shot_size();
    let mut run = 1;
    while run < cap && run <= i && items[i - run].shot_size() == size {
        run += 1;
    }
    run
}

/// Closest allowed size to `from` (by rank) accepted by `fits`; ties prefer the wider size.
fn nearest_size(
    from: ShotSize,
    allowed: &[ShotSize],
    fits: impl Fn(ShotSize) -> bool,
) -> Option<ShotSize> {
    allowed
        .iter()
        .copied()
        .filter(|s| fits(*s))
        .min_by_key(|s| (s.rank().abs_diff(from.rank()), s.rank()))
}

/// Enforce "no run longer than `max_run`" in place and report every repair.
pub fn enforce_variety<T: ShotSlot>(
    items: &mut [T],
    allowed: &[ShotSize],
    max_run: usize,
    lookahead: usize,
) -> Vec<Repair> {
    let max_run = max_run.max(1);
    let mut repairs = Vec::new();
    let n = items.len();
    // Size of a run already reported as unbreakable, while it continues.
    let mut stuck: Option<ShotSize> = None;
    for i in 0..n {
        if stuck == Some(items[i].shot_size()) {
            continue;
        }
        stuck = None;
        if run_length_ending_at(items, i, max_run + 1) <= max_run {
            continue;
        }
        let m = i - 1;
        let size = items[i].shot_size();
        // Whatever lands at `m` must also differ from the entry before it.
        let before = m.checked_sub(1).map(|k| items[k].shot_size());
        let fits = |s: ShotSize| s != size && Some(s) != before;
        let window_end = n.min(i + 1 + lookahead);
        let partner = if items[m].pinned() {
            None
        } else {
            (i + 1..window_end).find(|&j| !items[j].pinned() && fits(items[j].shot_size()))
        };
        let repair = match partner {
            Some(j) => {
                let repair = Repair::Swap {
                    position: m,
                    with: j,
                    moved: items[m].label().to_string(),
                    into_place: items[j].label().to_string(),
                };
                items.swap(m, j);
                repair
            }
            None => match nearest_size(size, allowed, fits) {
                Some(to) => {
                    items[m].set_shot_size(to);
                    Repair::Reframe {
                        position: m,
                        scene: items[m].label().to_string(),
                        from: size,
                        to,
                    }
                }
                None => {
                    log::warn!("shot-size run of {size} at position {i} cannot be broken");
                    stuck = Some(size);
                    Repair::Unresolved { position: i, size }
                }
            },
        };
        log::debug!("variety repair: {}", repair.describe());
        repairs.push(repair);
    }
    repairs
}

/// Longest run of equal consecutive sizes.
pub fn longest_run(sizes: impl IntoIterator<Item = ShotSize>) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut last = None;
    for s in sizes {
        if Some(s) == last {
            run += 1;
        } else {
            run = 1;
            last = Some(s);
        }
        best = best.max(run);
    }
    best
}
