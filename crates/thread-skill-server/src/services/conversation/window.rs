use crate::utils::text::{char_len, truncate_chars};

/// Character budget of a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBudget {
    /// Characters allowed per response.
    pub chars: usize,
    /// Extra characters granted per emitted post for the separator.
    pub separator_overhead: usize,
    /// Posts repeated from the previous window.
    pub overlap: usize,
}

/// Posts emitted in one turn plus the cursor to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub lines: Vec<String>,
    pub next_distance: i64,
}

/// Slice the next turn-sized window out of `posts`.
///
/// `distance` is the resume cursor returned by a previous call plus one (or
/// `None` for a fresh window); the window then starts `overlap` posts
/// earlier so the tail of the previous turn is heard again. Returns `None`
/// once the cursor runs past the end of the list.
pub fn slice(posts: &[String], distance: Option<i64>, budget: &WindowBudget) -> Option<Chunk> {
    let overlap = budget.overlap as i64;
    let mut window = posts;

    if let Some(distance) = distance {
        if distance >= posts.len() as i64 {
            return None;
        }

        let start = (distance - overlap).max(0) as usize;
        window = &posts[start..];

        // An oversized post must not occupy the overlap forever.
        let mut shift = 0;
        while overlap_chars(window, shift, budget.overlap) > budget.chars {
            shift += 1;
        }
        window = &window[shift..];
    }

    let lines = fill(window, budget);

    let emitted = lines.len() as i64;
    let next_distance = match distance {
        Some(distance) => distance + emitted - 1 - overlap,
        None => emitted - 1,
    };

    Some(Chunk {
        lines,
        next_distance,
    })
}

/// Characters of `window[shift..overlap]`.
fn overlap_chars(window: &[String], shift: usize, overlap: usize) -> usize {
    window
        .iter()
        .take(overlap)
        .skip(shift)
        .map(|post| char_len(post))
        .sum()
}

fn fill(window: &[String], budget: &WindowBudget) -> Vec<String> {
    let mut n_chars = 0;
    let mut lines: Vec<String> = Vec::new();

    for post in window {
        n_chars += char_len(post);

        if n_chars < budget.chars + budget.separator_overhead * lines.len() {
            lines.push(post.clone());
            continue;
        }

        match lines.len() {
            0 => lines.push(truncate_chars(post, budget.chars).to_string()),
            1 => {}
            _ => {
                lines.pop();
            }
        }
        break;
    }

    lines
}
