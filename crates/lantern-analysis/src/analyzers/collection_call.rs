//! Queries materialised into a collection only to be aggregated or filtered
//! in PHP, where the database could have done the work.

use lantern_core::errors::AnalysisResult;
use lantern_core::{Issue, Severity};

use super::context::AnalysisContext;
use super::traits::{Analyzer, Outcome};
use crate::php::{CallChain, ChainRoot};

/// Collection methods that have a query-builder equivalent.
const COLLECTION_METHODS: &[&str] = &[
    "count",
    "sum",
    "avg",
    "average",
    "max",
    "min",
    "first",
    "last",
    "pluck",
    "isEmpty",
    "isNotEmpty",
    "contains",
    "take",
    "skip",
    "only",
    "except",
    "find",
    "modelKeys",
    "diff",
];

/// Calls that only exist on a query builder, so a following `get()` runs a
/// query.
const BUILDER_METHODS: &[&str] = &[
    "query",
    "table",
    "select",
    "addSelect",
    "distinct",
    "from",
    "join",
    "leftJoin",
    "rightJoin",
    "crossJoin",
    "with",
    "withCount",
    "has",
    "doesntHave",
    "groupBy",
    "having",
    "latest",
    "oldest",
    "limit",
    "offset",
    "forPage",
    "withTrashed",
    "onlyTrashed",
];

const BUILDER_PREFIXES: &[&str] = &["where", "orWhere", "orderBy"];

fn is_collection_method(name: &str) -> bool {
    name.starts_with("where") || COLLECTION_METHODS.contains(&name)
}

fn is_builder_method(name: &str) -> bool {
    BUILDER_METHODS.contains(&name) || BUILDER_PREFIXES.iter().any(|p| name.starts_with(p))
}

pub struct CollectionCallAnalyzer;

impl CollectionCallAnalyzer {
    /// The collection method applied right after the query is materialised,
    /// with the index of its segment.
    pub fn offending_call(chain: &CallChain) -> Option<(usize, &str)> {
        let segments = &chain.segments;

        // Model::all()->count()
        if let ChainRoot::Static { method, .. } = &chain.root {
            if method == "all" {
                return segments
                    .first()
                    .filter(|s| is_collection_method(&s.name))
                    .map(|s| (0, s.name.as_str()));
            }
        }

        let root_is_builder =
            matches!(&chain.root, ChainRoot::Static { method, .. } if is_builder_method(method));
        for (i, segment) in segments.iter().enumerate() {
            if segment.name != "get" {
                continue;
            }
            let builder_evidence =
                root_is_builder || segments[..i].iter().any(|s| is_builder_method(&s.name));
            if !builder_evidence {
                continue;
            }
            if let Some(next) = segments.get(i + 1) {
                if is_collection_method(&next.name) {
                    return Some((i + 1, next.name.as_str()));
                }
            }
        }
        None
    }
}

impl Analyzer for CollectionCallAnalyzer {
    fn id(&self) -> &'static str {
        "collection-call"
    }

    fn title(&self) -> &'static str {
        "Collection calls instead of queries"
    }

    fn severity(&self) -> Severity {
        Severity::Major
    }

    fn time_to_fix(&self) -> u32 {
        10
    }

    fn analyze(&self, ctx: &AnalysisContext) -> AnalysisResult<Outcome> {
        let issues: Vec<Issue> = ctx
            .sources()?
            .chains()
            .filter_map(|(path, chain)| {
                let (index, method) = Self::offending_call(chain)?;
                let segment = &chain.segments[index];
                Some(
                    Issue::new(
                        Severity::Major,
                        format!(
                            "`{}` loads every row and calls {method}() on the collection.",
                            chain.display()
                        ),
                        format!("Call {method}() on the query builder so the database does the work."),
                    )
                    .at(path, segment.line)
                    .with_meta("column", segment.column)
                    .with_meta("method", method),
                )
            })
            .collect();

        if issues.is_empty() {
            return Ok(Outcome::passed("No queries are aggregated in PHP."));
        }
        Ok(Outcome::failed(format!(
            "{} queries are aggregated as collections.",
            issues.len()
        ))
        .with_issues(issues))
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::php::ChainSegment;

    fn segment(name: &str) -> ChainSegment {
        ChainSegment {
            name: name.to_string(),
            arg_count: 0,
            line: 1,
            column: 1,
        }
    }

    fn static_root(class: &str, method: &str) -> ChainRoot {
        ChainRoot::Static {
            class: class.to_string(),
            method: method.to_string(),
            arg_count: 0,
        }
    }

    #[test]
    fn all_followed_by_aggregate_is_flagged() {
        let chain = CallChain {
            root: static_root("App\\Models\\User", "all"),
            segments: smallvec![segment("count")],
        };
        assert_eq!(CollectionCallAnalyzer::offending_call(&chain), Some((0, "count")));
    }

    #[test]
    fn get_after_builder_call_is_flagged() {
        let chain = CallChain {
            root: ChainRoot::Variable {
                name: "$query".to_string(),
            },
            segments: smallvec![segment("where"), segment("get"), segment("sum")],
        };
        assert_eq!(CollectionCallAnalyzer::offending_call(&chain), Some((2, "sum")));

        let chain = CallChain {
            root: static_root("User", "where"),
            segments: smallvec![segment("get"), segment("whereIn")],
        };
        assert_eq!(CollectionCallAnalyzer::offending_call(&chain), Some((1, "whereIn")));
    }

    #[test]
    fn plain_get_without_builder_evidence_is_ignored() {
        // $request->get('x')->count() is not a query.
        let chain = CallChain {
            root: ChainRoot::Variable {
                name: "$request".to_string(),
            },
            segments: smallvec![segment("get"), segment("count")],
        };
        assert_eq!(CollectionCallAnalyzer::offending_call(&chain), None);

        let chain = CallChain {
            root: static_root("User", "where"),
            segments: smallvec![segment("get"), segment("map")],
        };
        assert_eq!(CollectionCallAnalyzer::offending_call(&chain), None);
    }
}
