//! Naming-Convention Inference
//!
//! Layered dependency heuristics for files whose content is unavailable,
//! and for reverse edges that are cheaper to infer at query time than to
//! persist. The conventions follow the controller → service → repository
//! layering common to the codebases this analyzer targets.
//!
//! Inferred dependents are intentionally NOT mirrored into the persisted
//! graph: persisting them would double-apply inference on every rebuild.
//! See `BuiltGraph::dependents_of` for the query-time union.

/// Forward edges inferred from the path alone: a controller is assumed to
/// depend on its same-named service, a service on its same-named
/// repository.
pub fn infer_dependencies(path: &str) -> Vec<String> {
    let lower = path.to_lowercase();
    let mut inferred = Vec::new();

    if lower.contains("controller") {
        push_rewrite(&mut inferred, path, "Controller", "Service");
    }
    if lower.contains("service") {
        push_rewrite(&mut inferred, path, "Service", "Repository");
    }

    inferred
}

/// Reverse edges inferred on demand: which files, by convention, depend
/// on this one.
pub fn infer_dependents(path: &str) -> Vec<String> {
    let lower = path.to_lowercase();
    let mut inferred = Vec::new();

    if lower.contains("model") || lower.contains("entity") {
        push_rewrite(&mut inferred, path, "Model", "Service");
        push_rewrite(&mut inferred, path, "Model", "Controller");
        push_rewrite(&mut inferred, path, "Entity", "Service");
        push_rewrite(&mut inferred, path, "Entity", "Controller");
    }
    if lower.contains("service") && !lower.contains("interface") {
        push_rewrite(&mut inferred, path, "Service", "Controller");
    }
    if lower.contains("repository") {
        push_rewrite(&mut inferred, path, "Repository", "Service");
    }

    inferred
}

/// Append the token-rewritten path when the rewrite changes something.
/// Both capitalizations of the token are tried so that `payment.service.ts`
/// and `PaymentService.cs` conventions rewrite the same way.
fn push_rewrite(out: &mut Vec<String>, path: &str, from: &str, to: &str) {
    for (f, t) in [
        (from.to_string(), to.to_string()),
        (from.to_lowercase(), to.to_lowercase()),
    ] {
        if path.contains(&f) {
            let rewritten = path.replace(&f, &t);
            if rewritten != path && !out.contains(&rewritten) {
                out.push(rewritten);
            }
        }
    }
}
