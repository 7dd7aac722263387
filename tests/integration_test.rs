use chanstats::config::Config;
use std::fs;
use std::path::Path;

const TRANSCRIPT: &str = "\
2026-02-09T10:00:00  <Ann> hi there
2026-02-09T10:05:00  <ann> yo
2026-02-09T10:06:12  <StatsBot> automated spam line that must not count
this is not a log line
2026-02-09T11:30:00  <Bob> one two three four five
2026-02-09T23:30:00  <BOB> late night words
2026-02-11T08:00:00  <cid> morning
";

fn config(dir: &Path) -> Config {
    Config {
        log_file: dir.join("channel.log"),
        ignore_file: Some(dir.join("ignored_nicks.txt")),
        output_dir: dir.join("www"),
        top_n: 2,
        timezone: "Europe/Stockholm".to_string(),
        channel: "#test".to_string(),
        network: "TestNet".to_string(),
    }
}

#[test]
fn end_to_end_reports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("channel.log"), TRANSCRIPT).unwrap();
    fs::write(dir.path().join("ignored_nicks.txt"), "STATSBOT\n").unwrap();

    let config = config(dir.path());
    assert!(chanstats::generate(&config).unwrap());

    let www = dir.path().join("www");
    let index = fs::read_to_string(www.join("index.html")).unwrap();
    let daily = fs::read_to_string(www.join("daily.html")).unwrap();
    let total = fs::read_to_string(www.join("total.html")).unwrap();

    // bob: 5 + 3 = 8 words, ann: 2 + 1 = 3, cid: 1 falls below top_n = 2
    assert!(index.contains("<td>bob</td><td>8</td>"));
    assert!(index.contains("<td>ann</td><td>3</td>"));
    assert!(!index.contains("<td>cid</td>"));

    // ignored nick appears nowhere, whatever the wire casing was
    for page in [&index, &daily, &total] {
        assert!(!page.to_lowercase().contains("statsbot"));
    }

    // bob's 23:30 UTC line lands on Feb 10 local (CET, UTC+1), so three
    // day sections exist, newest first
    let feb_11 = daily.find("<h2>2026-02-11</h2>").unwrap();
    let feb_10 = daily.find("<h2>2026-02-10</h2>").unwrap();
    let feb_09 = daily.find("<h2>2026-02-09</h2>").unwrap();
    assert!(feb_11 < feb_10 && feb_10 < feb_09);

    // total page lists everyone with percentages; bob has 8 of 12 words
    assert!(total.contains("<td>cid</td>"));
    assert!(total.contains("66.7%"));
    assert!(total.contains("width:300px"));

    // shared page shell
    assert!(index.contains("#test stats"));
    assert!(index.contains("TestNet"));
    assert!(index.contains("theme-toggle"));
}

#[test]
fn reruns_overwrite_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("channel.log"), TRANSCRIPT).unwrap();

    let config = config(dir.path());
    assert!(chanstats::generate(&config).unwrap());

    fs::write(
        dir.path().join("channel.log"),
        "2026-03-01T12:00:00 <dee> fresh start\n",
    )
    .unwrap();
    assert!(chanstats::generate(&config).unwrap());

    let index = fs::read_to_string(dir.path().join("www/index.html")).unwrap();
    assert!(index.contains("<td>dee</td>"));
    assert!(!index.contains("<td>bob</td>"));
}

#[test]
fn missing_transcript_ends_cleanly_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    assert!(!chanstats::generate(&config).unwrap());
    assert!(!dir.path().join("www").exists());
}

#[test]
fn missing_ignore_list_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("channel.log"),
        "2026-02-09T10:00:00 <ann> hello world\n",
    )
    .unwrap();

    // ignore_file points at a path that does not exist
    let config = config(dir.path());
    assert!(chanstats::generate(&config).unwrap());

    let index = fs::read_to_string(dir.path().join("www/index.html")).unwrap();
    assert!(index.contains("<td>ann</td><td>2</td>"));
}

#[test]
fn empty_transcript_renders_empty_reports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("channel.log"), "").unwrap();

    let config = config(dir.path());
    assert!(chanstats::generate(&config).unwrap());
    assert!(dir.path().join("www/total.html").is_file());
}
