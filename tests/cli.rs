//! Tests for the tagchunk binary

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tagchunk::chunk::grammar::REFERENCE_GRAMMAR;
use tempfile::NamedTempFile;

fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn chunk_file_in_bracket_format() {
    let input = input_file("The/DT red/JJ rose/NN\n\nand/CC\n");
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("chunk").arg(input.path());

    cmd.assert()
        .success()
        .stdout("(S (NP The/DT red/JJ rose/NN))\n(S and/CC)\n");
}

#[test]
fn chunk_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("chunk").write_stdin("in/IN the/DT house/NN\n");

    cmd.assert()
        .success()
        .stdout("(S (PP in/IN (NP the/DT house/NN)))\n");
}

#[test]
fn chunk_with_treeviz_format() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.args(["chunk", "--format", "treeviz"])
        .write_stdin("bought/VB a/DT rose/NN\n");

    cmd.assert().success().stdout(predicate::str::contains(
        "S\n└─ VP: bought a rose\n  ├─ bought/VB\n  └─ NP: a rose\n",
    ));
}

#[test]
fn chunk_json_input() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.args(["chunk", "--json"])
        .write_stdin("[[\"a\", \"DT\"], {\"text\": \"rose\", \"tag\": \"NN\"}]\n");

    cmd.assert().success().stdout("(S (NP a/DT rose/NN))\n");
}

#[test]
fn malformed_sentence_is_reported_and_others_continue() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("chunk")
        .write_stdin("the/DT rose/NN\nthe/DT rose\nand/CC\n");

    cmd.assert()
        .failure()
        .code(1)
        .stdout("(S (NP the/DT rose/NN))\n(S and/CC)\n")
        .stderr(predicate::str::contains("line 2: Malformed input at token 2"));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.args(["chunk", "--format", "dot"]).write_stdin("and/CC\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format 'dot'"));
}

#[test]
fn trace_goes_to_stderr() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.args(["chunk", "--trace"])
        .write_stdin("bought/VBD a/DT rose/NN\n");

    cmd.assert()
        .success()
        .stdout("(S (VP bought/VBD (NP a/DT rose/NN)))\n")
        .stderr(
            predicate::str::contains("line 1: rule 1 NP [1..3] a rose")
                .and(predicate::str::contains("line 1: rule 3 VP [0..3] bought a rose")),
        );
}

#[test]
fn grammar_file_replaces_reference_rules() {
    let grammar = input_file("# proper names only\nNAME: {<NNP>+}\n");
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("chunk")
        .arg("--grammar")
        .arg(grammar.path())
        .write_stdin("Ada/NNP Lovelace/NNP wrote/VBD\n");

    cmd.assert()
        .success()
        .stdout("(S (NAME Ada/NNP Lovelace/NNP) wrote/VBD)\n");
}

#[test]
fn invalid_grammar_file_fails() {
    let grammar = input_file("ADJ: {<JJ>*}\n");
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("grammar").arg("--grammar").arg(grammar.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("can match zero tags"));
}

#[test]
fn config_file_sets_root_label_and_format() {
    let config = toml_file("[grammar]\nroot_label = \"ROOT\"\n\n[output]\nformat = \"treeviz\"\n");
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("chunk")
        .arg("--config")
        .arg(config.path())
        .write_stdin("and/CC\n");

    cmd.assert().success().stdout("ROOT\n└─ and/CC\n");
}

#[test]
fn grammar_prints_reference_rules() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("grammar");

    cmd.assert().success().stdout(REFERENCE_GRAMMAR);
}

#[test]
fn grammar_warns_about_forward_references() {
    let grammar = input_file("PP: {<IN><NP>}\nNP: {<NN>+}\n");
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("grammar").arg("--grammar").arg(grammar.path());

    cmd.assert()
        .success()
        .stdout("PP: {<IN><NP>}\nNP: {<NN>+}\n")
        .stderr(predicate::str::contains("no earlier rule produces"));
}

#[test]
fn glossary_lists_used_tags() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("glossary")
        .write_stdin("The/DT rose/NN\nthe/DT lily/NN ./.\n");

    cmd.assert()
        .success()
        .stdout(".\tSentence-final punctuation\nDT\tDeterminer\nNN\tNoun, singular or mass\n");
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("bracket")
            .and(predicate::str::contains("treeviz"))
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("yaml")),
    );
}

#[test]
fn invalid_log_level_fails() {
    let mut cmd = cargo_bin_cmd!("tagchunk");
    cmd.args(["--log-level", "loud", "list-formats"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level 'loud'"));
}
