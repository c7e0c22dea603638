//! The request/response serve loop.
//!
//! Reads one request per line, writes search results as
//! `<basename>|<path>|<score>` lines with a blank terminator, and
//! drains rescan trigger events between requests. Search and rescan
//! never run concurrently: triggers landing while a search is being
//! served defer through the project lifecycle and run, coalesced to
//! one rescan, once the search completes.

use crate::protocol::{format_match, Request};
use anyhow::Result;
use quickopen_core::Project;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Serve requests from `input` until end of stream.
pub async fn serve<R, W>(
    input: R,
    mut output: W,
    project: &mut Project,
    rescan_rx: &mut mpsc::Receiver<()>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    let mut signals_open = true;

    loop {
        tokio::select! {
            event = rescan_rx.recv(), if signals_open => {
                match event {
                    Some(()) => apply_rescan_trigger(project, rescan_rx),
                    None => signals_open = false,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("end of input, shutting down");
                    break;
                };
                if let Some(request) = Request::parse(&line) {
                    handle_request(project, rescan_rx, request, &mut output).await?;
                }
            }
        }
    }

    Ok(())
}

/// Run one rescan for however many triggers have queued up.
fn apply_rescan_trigger(project: &mut Project, rescan_rx: &mut mpsc::Receiver<()>) {
    while rescan_rx.try_recv().is_ok() {}
    match project.request_rescan() {
        Ok(decision) => debug!(?decision, "rescan trigger handled"),
        Err(e) => warn!(error = %e, "triggered rescan failed"),
    }
}

async fn handle_request<W>(
    project: &mut Project,
    rescan_rx: &mut mpsc::Receiver<()>,
    request: Request,
    output: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    match request {
        Request::SetRoot(path) => {
            // No output on setroot; a failure keeps the prior index.
            if let Err(e) = project.set_root(&path) {
                warn!(path = %path.display(), error = %e, "setroot failed");
            }
        }
        Request::Search(query) => {
            project.begin_search();
            let matches = project.run_search(&query);
            debug!(query = %query, matches = matches.len(), "search served");

            for m in &matches {
                output.write_all(format_match(m).as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(b"\n").await?;
            output.flush().await?;

            // Triggers that landed during the search defer into one
            // pending rescan, run by finish_search.
            while rescan_rx.try_recv().is_ok() {
                project.request_rescan().ok();
            }
            if let Err(e) = project.finish_search() {
                warn!(error = %e, "deferred rescan failed");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickopen_core::IgnoreRules;
    use std::fs::File;
    use std::path::Path;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    fn open(root: &Path) -> Project {
        Project::open(Some(root.to_path_buf()), IgnoreRules::default()).unwrap()
    }

    async fn drive(project: &mut Project, input: &str) -> String {
        let (_tx, mut rx) = mpsc::channel(1);
        drive_with_events(project, input, &mut rx).await
    }

    async fn drive_with_events(
        project: &mut Project,
        input: &str,
        rescan_rx: &mut mpsc::Receiver<()>,
    ) -> String {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output, project, rescan_rx)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn backdate(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs))
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_emits_ranked_lines_and_terminator() {
        let temp_dir = tempdir().unwrap();
        File::create(temp_dir.path().join("bar_foo.rb")).unwrap();
        backdate(&temp_dir.path().join("bar_foo.rb"), 86_400);
        File::create(temp_dir.path().join("foo.txt")).unwrap();
        File::create(temp_dir.path().join("zzfoo.bak")).unwrap();

        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "search foo\n").await;

        let lines: Vec<&str> = output.split('\n').collect();
        assert_eq!(lines.len(), 4); // two matches, terminator, trailing
        assert!(lines[0].starts_with("foo.txt|"));
        assert!(lines[0].contains(&format!("|{}/foo.txt|", temp_dir.path().display())));
        assert!(lines[1].starts_with("bar_foo.rb|"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "");
    }

    #[tokio::test]
    async fn test_search_empty_directory_emits_only_terminator() {
        let temp_dir = tempdir().unwrap();
        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "search x\n").await;
        assert_eq!(output, "\n");
    }

    #[tokio::test]
    async fn test_empty_query_emits_only_terminator() {
        let temp_dir = tempdir().unwrap();
        File::create(temp_dir.path().join("foo.txt")).unwrap();
        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "search \n").await;
        assert_eq!(output, "\n");
    }

    #[tokio::test]
    async fn test_setroot_is_silent_and_switches_index() {
        let first = tempdir().unwrap();
        File::create(first.path().join("old.txt")).unwrap();
        let second = tempdir().unwrap();
        File::create(second.path().join("new.txt")).unwrap();

        let mut project = open(first.path());
        let input = format!("setroot {}\nsearch new\n", second.path().display());
        let output = drive(&mut project, &input).await;

        let lines: Vec<&str> = output.split('\n').collect();
        assert!(lines[0].starts_with("new.txt|"));
        assert_eq!(lines[1], "");
    }

    #[tokio::test]
    async fn test_bare_line_is_a_search() {
        let temp_dir = tempdir().unwrap();
        File::create(temp_dir.path().join("main.rs")).unwrap();
        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "main\n").await;
        assert!(output.starts_with("main.rs|"));
    }

    #[tokio::test]
    async fn test_blank_input_lines_produce_no_output() {
        let temp_dir = tempdir().unwrap();
        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "\n   \n").await;
        assert_eq!(output, "");
    }

    #[tokio::test]
    async fn test_eof_terminates_cleanly() {
        let temp_dir = tempdir().unwrap();
        let mut project = open(temp_dir.path());
        let output = drive(&mut project, "").await;
        assert_eq!(output, "");
    }

    #[tokio::test]
    async fn test_queued_rescan_trigger_is_applied() {
        let temp_dir = tempdir().unwrap();
        let mut project = open(temp_dir.path());
        File::create(temp_dir.path().join("new.txt")).unwrap();

        let (tx, mut rx) = mpsc::channel(1);
        tx.send(()).await.unwrap();

        // Whichever branch wins the first select, the trigger runs a
        // rescan and the second search must see the file.
        let output = drive_with_events(&mut project, "search new\nsearch new\n", &mut rx).await;
        assert!(output.contains("new.txt|"));
        assert!(output.ends_with("\n\n"));
        assert_eq!(project.indexed_files(), 1);
    }
}
