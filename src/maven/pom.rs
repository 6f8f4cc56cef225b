use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::ResolveError;
use crate::maven::coordinates::Scope;
use crate::maven::placeholder::{contains_placeholder, fill_opt};
use crate::maven::repository::{self, Repository};
use crate::util::xml::XmlDocument;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
}

/// A placeholder-resolved `/project/parent` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A dependency entry with every field resolved; entries that cannot be
/// fully resolved are dropped by the extractor, never emitted partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencySection {
    /// `/project/dependencies/dependency` — materialized.
    Hard,
    /// `/project/dependencyManagement/dependencies/dependency` — version and
    /// scope defaults for descendants, not materialized.
    Soft,
}

/// One resolved ancestor, nearest first, as seen by the extractor: its
/// properties for placeholder fallback, its management entries for version
/// fallback, and its own version for the inherited-version fallback.
pub struct AncestorLevel<'a> {
    pub properties: &'a HashMap<String, String>,
    pub soft_dependencies: &'a [DependencyEntry],
    pub version: &'a str,
}

/// Every child element under `/project/properties`, element name to text
/// content. Missing text content becomes an empty string; elements with
/// nested element content are skipped.
pub fn extract_properties(document: &XmlDocument) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    if let Some(container) = document.first(&["project", "properties"]) {
        for child in &container.children {
            if child.has_element_children() {
                continue;
            }
            properties.insert(child.name.clone(), child.text.clone());
        }
    }
    properties
}

/// The `/project/parent` reference, placeholder-resolved with the current
/// artifact's own properties. A parent element that is present but
/// unreadable is a fatal `MalformedDescriptor`; silence is `None`.
pub fn extract_parent_ref(
    document: &XmlDocument,
    properties: &HashMap<String, String>,
    coordinate: &str,
) -> Result<Option<ParentRef>, ResolveError> {
    let parent = match document.first(&["project", "parent"]) {
        Some(element) => element,
        None => return Ok(None),
    };

    let chain = [properties];
    let group_id = fill_opt(parent.child_text("groupId").map(str::to_string), &chain);
    let artifact_id = fill_opt(parent.child_text("artifactId").map(str::to_string), &chain);
    let version = fill_opt(parent.child_text("version").map(str::to_string), &chain);

    match (group_id, artifact_id, version) {
        (Some(g), Some(a), Some(v)) => Ok(Some(ParentRef {
            group_id: strip_whitespace(&g),
            artifact_id: strip_whitespace(&a),
            version: strip_whitespace(&v),
        })),
        _ => Err(ResolveError::MalformedDescriptor {
            coordinate: coordinate.to_string(),
            detail: "could not read parent coordinates from descriptor".to_string(),
        }),
    }
}

/// Every `/project/repositories/repository/url`, placeholder-resolved and
/// normalized. An empty `<url>` is skipped; a `repository` element with no
/// readable url is fatal. When a declared URL names a caller-supplied
/// repository (directly or through a proxy), that repository instance is
/// reused so its proxy set survives.
pub fn extract_declared_repositories(
    document: &XmlDocument,
    known: &[Repository],
    chain: &[&HashMap<String, String>],
    coordinate: &str,
) -> Result<Vec<Repository>, ResolveError> {
    let mut declared = Vec::new();

    for element in document.all(&["project", "repositories", "repository"]) {
        let url = fill_opt(element.child_text("url").map(str::to_string), chain);
        let url = match url {
            Some(url) => url,
            None => {
                return Err(ResolveError::MalformedDescriptor {
                    coordinate: coordinate.to_string(),
                    detail: "repository element with no readable url".to_string(),
                })
            }
        };
        if url.is_empty() {
            continue;
        }

        let url = repository::normalize_url(&url.replace('\r', "").replace('\n', ""))?;

        let repository = match known.iter().find(|r| r.matches_url(&url)) {
            Some(existing) => existing.clone(),
            None => Repository::new(&url)?,
        };
        repository::add_unique(&mut declared, repository);
    }

    Ok(declared)
}

/// Dependency entries from one section of a descriptor, in declaration
/// order, version-completed against the ancestor chain and filtered by the
/// target scope set. The drop policy is deliberate: entries missing a
/// resolvable version, or keeping a `${...}` token after the full chain
/// walk, are skipped silently.
pub fn extract_dependencies(
    document: &XmlDocument,
    section: DependencySection,
    properties: &HashMap<String, String>,
    ancestors: &[AncestorLevel<'_>],
    target_scopes: &[Scope],
) -> Vec<DependencyEntry> {
    let path: &[&str] = match section {
        DependencySection::Hard => &["project", "dependencies", "dependency"],
        DependencySection::Soft => &[
            "project",
            "dependencyManagement",
            "dependencies",
            "dependency",
        ],
    };

    let mut chain: Vec<&HashMap<String, String>> = vec![properties];
    chain.extend(ancestors.iter().map(|level| level.properties));

    let mut entries = Vec::new();
    for element in document.all(path) {
        let group_id = element.child_text("groupId").map(str::to_string);
        let artifact_id = element.child_text("artifactId").map(str::to_string);
        let mut version = element.child_text("version").map(str::to_string);
        let scope = element.child_text("scope").map(str::to_string);

        // version fallback 1: nearest ancestor's management entries
        if version.is_none() {
            if let (Some(g), Some(a)) = (&group_id, &artifact_id) {
                'levels: for level in ancestors {
                    for soft in level.soft_dependencies {
                        if soft.group_id == *g && soft.artifact_id == *a {
                            version = Some(soft.version.clone());
                            break 'levels;
                        }
                    }
                }
            }
        }

        let group_id = fill_opt(group_id, &chain);
        let artifact_id = fill_opt(artifact_id, &chain);
        let mut version = fill_opt(version, &chain);
        let scope = fill_opt(scope, &chain);

        // version fallback 2: the enclosing parent's own version
        if version.is_none() {
            version = ancestors.first().map(|level| level.version.to_string());
        }

        // some descriptors carry tokens that are never filled outside a
        // multi-module build; skip, don't fail
        if let Some(v) = &version {
            if contains_placeholder(v) {
                debug!(version = %v, "dropping dependency with unresolvable version");
                continue;
            }
        }

        let (group_id, artifact_id, version) = match (group_id, artifact_id, version) {
            (Some(g), Some(a), Some(v)) => (g, a, v),
            _ => continue,
        };

        let scope = Scope::from_name(scope.as_deref());
        if !target_scopes.contains(&scope) {
            continue;
        }

        entries.push(DependencyEntry {
            group_id: strip_whitespace(&group_id),
            artifact_id: strip_whitespace(&artifact_id),
            version: strip_whitespace(&version),
            scope,
        });
    }

    entries
}

fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL_SCOPES: [Scope; 6] = [
        Scope::Compile,
        Scope::Provided,
        Scope::Runtime,
        Scope::Test,
        Scope::System,
        Scope::Import,
    ];

    fn props(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_properties_rules() {
        let doc = XmlDocument::parse(
            "<project><properties>\
                <lib.version>2.0.0</lib.version>\
                <empty.prop></empty.prop>\
                <nested><inner>x</inner></nested>\
             </properties></project>",
        );
        let properties = extract_properties(&doc);
        assert_eq!(properties.get("lib.version").map(String::as_str), Some("2.0.0"));
        assert_eq!(properties.get("empty.prop").map(String::as_str), Some(""));
        assert!(!properties.contains_key("nested"));
    }

    #[test]
    fn test_parent_ref_resolved_with_own_properties() {
        let doc = XmlDocument::parse(
            "<project><parent>\
                <groupId>org.example</groupId>\
                <artifactId>parent-pom</artifactId>\
                <version>${rev}</version>\
             </parent></project>",
        );
        let parent = extract_parent_ref(&doc, &props(&[("rev", "7")]), "org.example:lib:1.0")
            .unwrap()
            .unwrap();
        assert_eq!(parent.version, "7");
        assert_eq!(parent.artifact_id, "parent-pom");
    }

    #[test]
    fn test_unreadable_parent_is_fatal() {
        let doc = XmlDocument::parse(
            "<project><parent><groupId>org</groupId></parent></project>",
        );
        assert!(matches!(
            extract_parent_ref(&doc, &HashMap::new(), "org:lib:1.0"),
            Err(ResolveError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn test_absent_parent_is_none() {
        let doc = XmlDocument::parse("<project/>");
        assert!(extract_parent_ref(&doc, &HashMap::new(), "org:lib:1.0")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_declared_repository_reuses_known_proxy() {
        let doc = XmlDocument::parse(
            "<project><repositories>\
                <repository><id>u</id><url>https://upstream.example.com</url></repository>\
                <repository><id>skip</id><url></url></repository>\
             </repositories></project>",
        );
        let mirror = Repository::new("https://mirror.example.com/")
            .unwrap()
            .with_proxy("https://upstream.example.com/")
            .unwrap();
        let declared =
            extract_declared_repositories(&doc, &[mirror.clone()], &[], "org:lib:1.0").unwrap();
        assert_eq!(declared, vec![mirror]);
    }

    #[test]
    fn test_repository_without_url_is_fatal() {
        let doc = XmlDocument::parse(
            "<project><repositories><repository><id>x</id></repository></repositories></project>",
        );
        assert!(matches!(
            extract_declared_repositories(&doc, &[], &[], "org:lib:1.0"),
            Err(ResolveError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn test_dependency_version_from_own_property() {
        let doc = XmlDocument::parse(
            "<project><dependencies><dependency>\
                <groupId>org</groupId><artifactId>helper</artifactId>\
                <version>${helper.version}</version>\
             </dependency></dependencies></project>",
        );
        let properties = props(&[("helper.version", "2.0.0")]);
        let entries = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &properties,
            &[],
            &ALL_SCOPES,
        );
        assert_eq!(
            entries,
            vec![DependencyEntry {
                group_id: "org".to_string(),
                artifact_id: "helper".to_string(),
                version: "2.0.0".to_string(),
                scope: Scope::Compile,
            }]
        );
    }

    #[test]
    fn test_dependency_version_from_ancestor_management() {
        let doc = XmlDocument::parse(
            "<project><dependencies><dependency>\
                <groupId>org</groupId><artifactId>managed</artifactId>\
             </dependency></dependencies></project>",
        );
        let own = HashMap::new();
        let parent_props = HashMap::new();
        let soft = vec![DependencyEntry {
            group_id: "org".to_string(),
            artifact_id: "managed".to_string(),
            version: "3.1.4".to_string(),
            scope: Scope::Compile,
        }];
        let ancestors = [AncestorLevel {
            properties: &parent_props,
            soft_dependencies: &soft,
            version: "9.9.9",
        }];
        let entries =
            extract_dependencies(&doc, DependencySection::Hard, &own, &ancestors, &ALL_SCOPES);
        assert_eq!(entries[0].version, "3.1.4");
    }

    #[test]
    fn test_dependency_version_falls_back_to_parent_version() {
        let doc = XmlDocument::parse(
            "<project><dependencies><dependency>\
                <groupId>org</groupId><artifactId>sibling</artifactId>\
             </dependency></dependencies></project>",
        );
        let own = HashMap::new();
        let parent_props = HashMap::new();
        let ancestors = [AncestorLevel {
            properties: &parent_props,
            soft_dependencies: &[],
            version: "5.0.0",
        }];
        let entries =
            extract_dependencies(&doc, DependencySection::Hard, &own, &ancestors, &ALL_SCOPES);
        assert_eq!(entries[0].version, "5.0.0");
    }

    #[test]
    fn test_unresolvable_version_token_drops_entry() {
        let doc = XmlDocument::parse(
            "<project><dependencies><dependency>\
                <groupId>org</groupId><artifactId>reactor-only</artifactId>\
                <version>${reactor.prop}</version>\
             </dependency></dependencies></project>",
        );
        let entries = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &ALL_SCOPES,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn test_versionless_entry_without_fallback_drops() {
        let doc = XmlDocument::parse(
            "<project><dependencies><dependency>\
                <groupId>org</groupId><artifactId>no-version</artifactId>\
             </dependency></dependencies></project>",
        );
        let entries = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &ALL_SCOPES,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn test_scope_filter_prunes_before_resolution() {
        let doc = XmlDocument::parse(
            "<project><dependencies>\
                <dependency><groupId>org</groupId><artifactId>a</artifactId>\
                    <version>1</version><scope>test</scope></dependency>\
                <dependency><groupId>org</groupId><artifactId>b</artifactId>\
                    <version>1</version></dependency>\
             </dependencies></project>",
        );
        let entries = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &[Scope::Compile, Scope::Runtime],
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].artifact_id, "b");

        let with_test = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &[Scope::Compile, Scope::Runtime, Scope::Test],
        );
        assert_eq!(with_test.len(), 2);
    }

    #[test]
    fn test_soft_section_path() {
        let doc = XmlDocument::parse(
            "<project><dependencyManagement><dependencies><dependency>\
                <groupId>org</groupId><artifactId>managed</artifactId><version>1.2.3</version>\
             </dependency></dependencies></dependencyManagement></project>",
        );
        let soft = extract_dependencies(
            &doc,
            DependencySection::Soft,
            &HashMap::new(),
            &[],
            &ALL_SCOPES,
        );
        assert_eq!(soft.len(), 1);
        let hard = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &ALL_SCOPES,
        );
        assert!(hard.is_empty());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let doc = XmlDocument::parse(
            "<project><dependencies>\
                <dependency><groupId>org</groupId><artifactId>z</artifactId><version>1</version></dependency>\
                <dependency><groupId>org</groupId><artifactId>a</artifactId><version>1</version></dependency>\
                <dependency><groupId>org</groupId><artifactId>m</artifactId><version>1</version></dependency>\
             </dependencies></project>",
        );
        let entries = extract_dependencies(
            &doc,
            DependencySection::Hard,
            &HashMap::new(),
            &[],
            &ALL_SCOPES,
        );
        let ids: Vec<&str> = entries.iter().map(|e| e.artifact_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }
}
