use crate::maven::repository::Repository;

/// Standard Maven repository layout:
/// `{repo}/{group-with-slashes}/{artifactId}/{version}/{artifactId}-{realVersion}.{jar|pom}`
/// with `maven-metadata.xml` at the artifact- and version-directory levels.
/// These strings must be reproduced bit-for-bit for real repositories.

pub fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

/// Percent-encodes a single path segment. Raw caller text never reaches a
/// URL without passing through here.
pub fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

pub fn pom_url(
    repository: &str,
    group_id: &str,
    artifact_id: &str,
    version: &str,
    real_version: &str,
) -> String {
    artifact_file_url(repository, group_id, artifact_id, version, real_version, "pom")
}

pub fn jar_url(
    repository: &str,
    group_id: &str,
    artifact_id: &str,
    version: &str,
    real_version: &str,
) -> String {
    artifact_file_url(repository, group_id, artifact_id, version, real_version, "jar")
}

fn artifact_file_url(
    repository: &str,
    group_id: &str,
    artifact_id: &str,
    version: &str,
    real_version: &str,
    extension: &str,
) -> String {
    format!(
        "{}{}/{}/{}/{}-{}.{}",
        repository,
        group_path(group_id),
        encode(artifact_id),
        encode(version),
        encode(artifact_id),
        encode(real_version),
        extension,
    )
}

/// `maven-metadata.xml` at the artifact-directory level; carries the
/// `latest`/`release` versioning elements. Each repository's proxies are
/// listed before its base URL.
pub fn artifact_level_metadata_urls(
    repositories: &[Repository],
    group_id: &str,
    artifact_id: &str,
) -> Vec<String> {
    let group = group_path(group_id);
    let mut urls = Vec::new();
    for repository in repositories {
        for proxy in repository.proxies() {
            urls.push(format!(
                "{}{}/{}/maven-metadata.xml",
                proxy,
                group,
                encode(artifact_id)
            ));
        }
        urls.push(format!(
            "{}{}/{}/maven-metadata.xml",
            repository.url(),
            group,
            encode(artifact_id)
        ));
    }
    urls
}

/// `maven-metadata.xml` at the version-directory level; carries the
/// snapshot timestamp/buildNumber elements.
pub fn version_level_metadata_urls(
    repositories: &[Repository],
    group_id: &str,
    artifact_id: &str,
    version: &str,
) -> Vec<String> {
    let group = group_path(group_id);
    let mut urls = Vec::new();
    for repository in repositories {
        for proxy in repository.proxies() {
            urls.push(format!(
                "{}{}/{}/{}/maven-metadata.xml",
                proxy,
                group,
                encode(artifact_id),
                encode(version)
            ));
        }
        urls.push(format!(
            "{}{}/{}/{}/maven-metadata.xml",
            repository.url(),
            group,
            encode(artifact_id),
            encode(version)
        ));
    }
    urls
}

/// Expands a caller-supplied direct-URL template. `{GROUP}`, `{ARTIFACT}`
/// and `{VERSION}` stand for the slash-form group path, the artifact id and
/// the (resolved) version.
pub fn expand_direct_url(template: &str, group_id: &str, artifact_id: &str, version: &str) -> String {
    template
        .replace("{GROUP}", &group_path(group_id))
        .replace("{ARTIFACT}", artifact_id)
        .replace("{VERSION}", version)
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::release(
        "https://repo1.maven.org/maven2/", "com.google.guava", "guava", "27.1-jre", "27.1-jre",
        "https://repo1.maven.org/maven2/com/google/guava/guava/27.1-jre/guava-27.1-jre.pom"
    )]
    #[case::snapshot_stamped(
        "https://repo.example.com/", "co.aikar", "acf-core", "0.5.0-SNAPSHOT", "0.5.0-20190101.010101-42",
        "https://repo.example.com/co/aikar/acf-core/0.5.0-SNAPSHOT/acf-core-0.5.0-20190101.010101-42.pom"
    )]
    fn test_pom_url(
        #[case] repository: &str,
        #[case] group_id: &str,
        #[case] artifact_id: &str,
        #[case] version: &str,
        #[case] real_version: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            pom_url(repository, group_id, artifact_id, version, real_version),
            expected
        );
    }

    #[test]
    fn test_jar_url_extension() {
        assert_eq!(
            jar_url("https://r/", "org", "lib", "1.0", "1.0"),
            "https://r/org/lib/1.0/lib-1.0.jar"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let url = pom_url("https://r/", "org", "my lib", "1.0 rc", "1.0 rc");
        assert_eq!(url, "https://r/org/my%20lib/1.0%20rc/my%20lib-1.0%20rc.pom");
    }

    #[test]
    fn test_artifact_level_metadata_lists_proxies_first() {
        let repository = Repository::new("https://upstream.example.com/")
            .unwrap()
            .with_proxy("https://mirror.example.com/")
            .unwrap();
        let urls = artifact_level_metadata_urls(&[repository], "org.example", "lib");
        assert_eq!(
            urls,
            vec![
                "https://mirror.example.com/org/example/lib/maven-metadata.xml".to_string(),
                "https://upstream.example.com/org/example/lib/maven-metadata.xml".to_string(),
            ]
        );
    }

    #[test]
    fn test_version_level_metadata_includes_version_directory() {
        let repository = Repository::new("https://r/").unwrap();
        let urls = version_level_metadata_urls(&[repository], "org", "lib", "1.0-SNAPSHOT");
        assert_eq!(
            urls,
            vec!["https://r/org/lib/1.0-SNAPSHOT/maven-metadata.xml".to_string()]
        );
    }

    #[rstest]
    #[case::all_tokens(
        "https://cdn.example.com/{GROUP}/{ARTIFACT}/{VERSION}/custom.jar",
        "https://cdn.example.com/org/example/lib/1.0/custom.jar"
    )]
    #[case::no_tokens("https://cdn.example.com/fixed.jar", "https://cdn.example.com/fixed.jar")]
    fn test_expand_direct_url(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(expand_direct_url(template, "org.example", "lib", "1.0"), expected);
    }
}
