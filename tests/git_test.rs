//! Integration tests for repository access against real git repositories.

mod common;

use anyhow::Result;
use common::{create_test_repo, git, git_commit, git_commit_at, write_file};
use gitshelf::{
    RefKind, analyze_repository, list_commits, list_files, list_tags, open_shared,
    read_blob_by_id, ref_decorations,
};

#[test]
fn test_analyze_repository_reads_head_branch() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README.md", "# Test")?;
    git_commit(repo.path(), "Initial commit")?;
    git(repo.path(), &["checkout", "--quiet", "-b", "release/1.x"])?;

    // Act
    let info = analyze_repository(repo.path(), Some("owner".to_string()))?;

    // Assert
    assert_eq!(info.default_branch(), "release/1.x");
    assert_eq!(info.owner(), Some("owner"));
    Ok(())
}

#[test]
fn test_list_files_and_read_blobs_by_id() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README.md", "# Test")?;
    write_file(repo.path(), "src/main.rs", "fn main() {}\n")?;
    write_file(repo.path(), "data.bin", [0u8, 1, 2, 255])?;
    git_commit(repo.path(), "Initial commit")?;

    // Act
    let files = list_files(repo.path(), Some("main"))?;
    let shared = open_shared(repo.path())?;
    let repo_handle = shared.to_thread_local();

    // Assert
    let mut paths: Vec<&str> = files.iter().filter_map(|f| f.path_str()).collect();
    paths.sort();
    assert_eq!(paths, vec!["README.md", "data.bin", "src/main.rs"]);

    let main_rs = files
        .iter()
        .find(|f| f.path_str() == Some("src/main.rs"))
        .expect("src/main.rs listed");
    assert_eq!(read_blob_by_id(&repo_handle, *main_rs.oid())?, b"fn main() {}\n");

    let data = files
        .iter()
        .find(|f| f.path_str() == Some("data.bin"))
        .expect("data.bin listed");
    assert_eq!(read_blob_by_id(&repo_handle, *data.oid())?, vec![0u8, 1, 2, 255]);
    Ok(())
}

#[test]
fn test_read_blob_by_id_rejects_non_blob() -> Result<()> {
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "a")?;
    let head = git_commit(repo.path(), "Initial commit")?;

    let shared = open_shared(repo.path())?;
    let commit_id = gix::ObjectId::from_hex(head.as_bytes())?;
    let result = read_blob_by_id(&shared.to_thread_local(), commit_id);

    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_list_commits_newest_first_with_limit() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    for i in 0..3 {
        write_file(repo.path(), "file.txt", format!("v{}", i))?;
        git_commit_at(repo.path(), &format!("Commit {}", i), 1_600_000_000 + i * 100)?;
    }

    // Act
    let all = list_commits(repo.path(), Some("main"), None)?;
    let limited = list_commits(repo.path(), Some("main"), Some(2))?;

    // Assert
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].message(), "Commit 2");
    assert_eq!(all[2].message(), "Commit 0");
    assert_eq!(all[0].date(), 1_600_000_200);
    assert_eq!(all[0].short_oid().len(), 7);
    assert_eq!(limited.len(), 2);
    Ok(())
}

#[test]
fn test_commits_carry_ref_names_in_decoration_order() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "a")?;
    let first = git_commit(repo.path(), "First")?;
    git(repo.path(), &["tag", "v0.1", &first])?;
    write_file(repo.path(), "a.txt", "b")?;
    git_commit(repo.path(), "Second")?;
    git(repo.path(), &["tag", "-a", "v1.0", "-m", "Release 1.0"])?;
    git(repo.path(), &["branch", "develop"])?;
    git(repo.path(), &["update-ref", "refs/remotes/origin/main", "HEAD"])?;
    git(
        repo.path(),
        &["symbolic-ref", "refs/remotes/origin/HEAD", "refs/remotes/origin/main"],
    )?;

    // Act
    let commits = list_commits(repo.path(), Some("main"), None)?;

    // Assert
    let head_refs = commits[0].ref_names();
    let kinds: Vec<RefKind> = head_refs.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds.first(), Some(&RefKind::Head));
    assert_eq!(head_refs[0].name(), "HEAD");
    assert_eq!(head_refs[0].target(), "main");
    assert_eq!(kinds.last(), Some(&RefKind::Tag));
    assert_eq!(head_refs.last().map(|r| r.name()), Some("v1.0"));

    let branch = head_refs
        .iter()
        .find(|r| r.kind() == RefKind::Branch)
        .expect("Local branch decoration");
    assert_eq!(branch.name(), "develop");

    let remote_head = head_refs
        .iter()
        .find(|r| r.kind() == RefKind::RemoteHead)
        .expect("Symbolic remote head decoration");
    assert_eq!(remote_head.name(), "origin/HEAD");
    assert_eq!(remote_head.target(), "origin/main");
    assert!(
        head_refs
            .iter()
            .any(|r| r.kind() == RefKind::Remote && r.name() == "origin/main")
    );

    let first_refs = commits[1].ref_names();
    assert_eq!(first_refs.len(), 1);
    assert_eq!(first_refs[0].kind(), RefKind::Tag);
    assert_eq!(first_refs[0].name(), "v0.1");
    Ok(())
}

#[test]
fn test_ref_decorations_detached_head() -> Result<()> {
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "a")?;
    let first = git_commit(repo.path(), "First")?;
    write_file(repo.path(), "a.txt", "b")?;
    git_commit(repo.path(), "Second")?;
    git(repo.path(), &["checkout", "--quiet", "--detach", &first])?;

    let shared = open_shared(repo.path())?;
    let decorations = ref_decorations(&shared.to_thread_local())?;

    let first_id = gix::ObjectId::from_hex(first.as_bytes())?;
    assert_eq!(decorations.get(&first_id).map(String::as_str), Some("HEAD"));
    Ok(())
}

#[test]
fn test_list_tags_newest_first() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "a.txt", "1")?;
    let old = git_commit_at(repo.path(), "Old", 1_500_000_000)?;
    git(repo.path(), &["tag", "v1.0"])?;
    write_file(repo.path(), "a.txt", "2")?;
    git_commit_at(repo.path(), "New", 1_600_000_000)?;
    git(repo.path(), &["tag", "-a", "v2.0", "-m", "Second release"])?;

    // Act
    let tags = list_tags(repo.path())?;

    // Assert
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["v2.0", "v1.0"]);
    assert_eq!(tags[1].commit_hash, old);
    assert_eq!(tags[1].short_oid, old[..7]);
    assert_eq!(tags[0].date, 1_600_000_000);
    Ok(())
}
