use std::ops::{Index, IndexMut};

// A D-path is a path which starts at (0,0) that has exactly D non-diagonal edges. All D-paths
// consist of a (D - 1)-path followed by a non-diagonal edge and then a possibly empty sequence of
// diagonal edges called a snake.

/// `V` holds the endpoints of the furthest reaching D-paths. For an endpoint `(x, y)` on diagonal
/// `k` only `x` is kept since `y = x - k`.
///
/// `k` can be negative, so `V` is a `Vec` plus an `offset` mapping `-max_d..=max_d` onto
/// `0..=2 * max_d`.
#[derive(Debug, Clone)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }

    // Upper bound on `D` for comparing sequences of these lengths
    fn max_d(len1: usize, len2: usize) -> usize {
        (len1 + len2).div_ceil(2) + 1
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output {
        &self.v[(index + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        &mut self.v[(index + self.offset) as usize]
    }
}

/// A sequence of diagonal edges in the edit graph, possibly of length zero.
#[derive(Debug)]
struct Snake {
    x_start: usize,
    y_start: usize,
}

/// Steps the search for an edit script may take before the ranges still left are reported as
/// entirely changed.
const MAX_COST: usize = 1 << 22;

/// Mark every item of `old` and `new` which is not part of the common subsequence found by
/// Myers' algorithm.
///
/// The returned vectors have the same lengths as `old` and `new`. The number of unmarked items is
/// always the same on both sides and unmarked items pair up in order.
pub(crate) fn changed_marks<T: PartialEq>(old: &[T], new: &[T]) -> (Vec<bool>, Vec<bool>) {
    changed_marks_within(old, new, MAX_COST)
}

/// Like [`changed_marks`], giving up on finding a longest common subsequence once `budget` steps
/// have been spent. Common prefixes and suffixes are always found.
pub(crate) fn changed_marks_within<T: PartialEq>(
    old: &[T],
    new: &[T],
    budget: usize,
) -> (Vec<bool>, Vec<bool>) {
    let mut old_marks = vec![false; old.len()];
    let mut new_marks = vec![false; new.len()];

    // `vf` searches from the top left corner, `vb` from the bottom right one
    let max_d = V::max_d(old.len(), new.len());
    let mut search = Search {
        vf: V::new(max_d),
        vb: V::new(max_d),
        budget,
    };

    conquer(old, new, &mut old_marks, &mut new_marks, &mut search);

    (old_marks, new_marks)
}

struct Search {
    vf: V,
    vb: V,
    /// Remaining steps; every diagonal visited and every diagonal edge followed costs one
    budget: usize,
}

fn common_prefix_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

fn conquer<T: PartialEq>(
    old: &[T],
    new: &[T],
    old_marks: &mut [bool],
    new_marks: &mut [bool],
    search: &mut Search,
) {
    let prefix = common_prefix_len(old, new);
    let (old, new) = (&old[prefix..], &new[prefix..]);
    let suffix = common_suffix_len(old, new);
    let old = &old[..old.len() - suffix];
    let new = &new[..new.len() - suffix];

    let old_marks = &mut old_marks[prefix..prefix + old.len()];
    let new_marks = &mut new_marks[prefix..prefix + new.len()];

    if old.is_empty() {
        new_marks.fill(true);
    } else if new.is_empty() {
        old_marks.fill(true);
    } else if let Some(snake) = find_middle_snake(old, new, search) {
        // Divide & Conquer
        let (old_a, old_b) = old.split_at(snake.x_start);
        let (new_a, new_b) = new.split_at(snake.y_start);
        let (old_marks_a, old_marks_b) = old_marks.split_at_mut(snake.x_start);
        let (new_marks_a, new_marks_b) = new_marks.split_at_mut(snake.y_start);

        conquer(old_a, new_a, old_marks_a, new_marks_a, search);
        conquer(old_b, new_b, old_marks_b, new_marks_b, search);
    } else {
        // Out of budget
        old_marks.fill(true);
        new_marks.fill(true);
    }
}

// Finds the middle snake of an optimal D-path by running the greedy search forwards from (0,0)
// and backwards from (N,M) at the same time until the two furthest reaching paths overlap.
// Returns `None` if the search runs out of budget first.
fn find_middle_snake<T: PartialEq>(old: &[T], new: &[T], search: &mut Search) -> Option<Snake> {
    let Search { vf, vb, budget } = search;
    let n = old.len();
    let m = new.len();

    // The length of an optimal edit script has the same parity as `delta`
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    let d_max = V::max_d(n, m) as isize;
    for d in 0..d_max {
        if *budget == 0 {
            return None;
        }
        *budget = budget.saturating_sub(2 * d as usize + 2);

        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            let (x0, y0) = (x, y);
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }

            vf[k] = x;
            *budget = budget.saturating_sub(x - x0);

            // Only an odd delta can overlap while extending forwards
            if odd && (k - delta).abs() <= d - 1 && vf[k] + vb[-(k - delta)] >= n {
                return Some(Snake {
                    x_start: x0,
                    y_start: y0,
                });
            }
        }

        // Backward path, with `x` and `y` counted from the end of each sequence
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            let x0 = x;
            while x < n && y < m && old[n - x - 1] == new[m - y - 1] {
                x += 1;
                y += 1;
            }

            vb[k] = x;
            *budget = budget.saturating_sub(x - x0);

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some(Snake {
                    x_start: n - x,
                    y_start: m - y,
                });
            }
        }
    }

    unreachable!("unable to find a middle snake");
}
