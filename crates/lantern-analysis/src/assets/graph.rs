//! Depth-first walk of the Vite chunk import graph.

use lantern_core::FxHashSet;

use super::manifest::ViteManifest;

/// Every output file reachable from the manifest roots: each chunk's `file`,
/// its `css` and its `assets`, deduplicated in first-seen order.
///
/// Static and dynamic imports are followed. Cycles terminate on the visited
/// set; chunks deeper than `max_depth` are skipped.
pub fn collect_vite_files(manifest: &ViteManifest, max_depth: usize) -> Vec<String> {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut seen_files: FxHashSet<&str> = FxHashSet::default();
    let mut files: Vec<String> = Vec::new();

    for root in manifest.roots() {
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
        while let Some((key, depth)) = stack.pop() {
            if depth > max_depth {
                tracing::debug!(chunk = key, depth, "manifest depth bound reached");
                continue;
            }
            if !visited.insert(key) {
                continue;
            }
            let Some(chunk) = manifest.get(key) else {
                tracing::debug!(chunk = key, "import not present in manifest");
                continue;
            };

            let outputs = std::iter::once(&chunk.file)
                .chain(chunk.css.iter())
                .chain(chunk.assets.iter());
            for file in outputs {
                if !file.is_empty() && seen_files.insert(file.as_str()) {
                    files.push(file.clone());
                }
            }

            // Reverse so the first import is visited first.
            let children = chunk.imports.iter().chain(chunk.dynamic_imports.iter());
            let children: Vec<&str> = children.map(String::as_str).collect();
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    files
}
