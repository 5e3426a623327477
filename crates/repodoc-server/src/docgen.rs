//! Documentation aggregator.
//!
//! Fans out independent, individually-failable fetches (README, manifest,
//! repository metadata, directory listing) and composes them into a single
//! prompt for the completion backend. README, manifest, and listing are
//! absent-tolerant: a failed fetch contributes nothing instead of aborting.
//! Repository metadata is structurally required and its failure propagates.

use tracing::debug;

use repodoc_github::{ContentEntry, GithubClient, GithubError, RAW_CONTENT, RepoDetails};

/// Sampling temperature for documentation generation.
pub const DOC_TEMPERATURE: f32 = 0.7;

/// Maximum output tokens for documentation generation.
pub const DOC_MAX_TOKENS: u32 = 4000;

/// System instruction for the completion backend.
pub const SYSTEM_PROMPT: &str = "You are a professional technical documentation writer. \
     Generate comprehensive markdown documentation.";

/// Request-scoped aggregate of everything the prompt is built from.
#[derive(Debug)]
pub struct DocContext {
    /// README text; empty when the repository has none.
    pub readme: String,
    /// Manifest (`package.json`) text; empty when absent.
    pub manifest: String,
    /// Repository metadata. Required.
    pub details: RepoDetails,
    /// Top-level directory entries; empty when the listing failed.
    pub entries: Vec<ContentEntry>,
}

/// Gather the documentation context for a repository.
///
/// All four fetches are issued concurrently; only the metadata result is
/// allowed to fail the pipeline.
pub async fn gather(
    github: &GithubClient,
    credential: &str,
    owner: &str,
    repo: &str,
) -> Result<DocContext, GithubError> {
    let readme_path = format!("/repos/{owner}/{repo}/readme");
    let manifest_path = format!("/repos/{owner}/{repo}/contents/package.json");

    let (readme, manifest, details, entries) = tokio::join!(
        github.get_raw(credential, &readme_path, RAW_CONTENT),
        github.get_raw(credential, &manifest_path, RAW_CONTENT),
        github.repo_details(credential, owner, repo),
        github.contents(credential, owner, repo),
    );

    Ok(DocContext {
        readme: absorb(readme, "readme"),
        manifest: absorb(manifest, "manifest"),
        details: details?,
        entries: absorb(entries, "listing"),
    })
}

/// Downgrade an optional fetch's failure to "absent".
fn absorb<T: Default>(result: Result<T, GithubError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            debug!(what, error = %e, "Optional fetch unavailable, continuing without it");
            T::default()
        }
    }
}

/// Render the first `limit` directory entries, one per line, each tagged
/// with its kind.
pub fn render_listing(entries: &[ContentEntry], limit: usize) -> String {
    entries
        .iter()
        .take(limit)
        .map(|e| {
            let marker = if e.is_dir() { "[DIR]" } else { "[FILE]" };
            format!("{} {}", marker, e.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the documentation prompt.
///
/// Fixed 8-section outline; sections for absent inputs are simply omitted.
pub fn build_prompt(owner: &str, repo: &str, ctx: &DocContext, listing_limit: usize) -> String {
    let description = ctx
        .details
        .description
        .as_deref()
        .unwrap_or("No description available");
    let language = ctx.details.language.as_deref().unwrap_or("Unknown");
    let listing = render_listing(&ctx.entries, listing_limit);

    let mut prompt = format!(
        "You are a professional technical documentation writer. Generate comprehensive, \
         well-structured documentation for the following GitHub repository.\n\n\
         Repository: {owner}/{repo}\n\
         Description: {description}\n\
         Language: {language}\n\
         Stars: {stars}\n\n",
        stars = ctx.details.stargazers_count,
    );

    if !ctx.readme.is_empty() {
        prompt.push_str(&format!("Existing README:\n{}\n\n", ctx.readme));
    }
    if !ctx.manifest.is_empty() {
        prompt.push_str(&format!("Package.json:\n{}\n\n", ctx.manifest));
    }
    if !listing.is_empty() {
        prompt.push_str(&format!("Repository Structure (sample):\n{listing}\n\n"));
    }

    prompt.push_str(
        "Please create a professional markdown documentation with the following sections:\n\
         1. Project Overview - Clear description of what the project does\n\
         2. Features - Key features and capabilities\n\
         3. Technology Stack - Technologies and frameworks used\n\
         4. Installation Guide - Step-by-step installation instructions\n\
         5. Usage - How to use the project with examples\n\
         6. Project Structure - Explanation of main directories and files\n\
         7. Contributing - Guidelines for contributing\n\
         8. License - License information\n\n\
         Return ONLY the markdown content, properly formatted with headers, code blocks, \
         and lists. Make it professional and comprehensive.",
    );

    prompt
}
