// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::{path::PathBuf, process::Command, time::Duration};

use mkp::*;
use regex::Regex;

fn locate(id: &str) -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/mkp/")
        .join(id)
}

fn solve_with(id: &str, solver: &mut dyn Solver) -> i64 {
    let problem   = read_instance(locate(id)).expect("instance not found");
    let mut state = SolutionState::new(&problem);
    solver.solve(&mut state, Duration::from_secs(30)).expect("solver failed");
    assert!(state.validate().is_feasible());
    state.objective()
}

fn solve(id: &str) -> i64 {
    solve_with(id, &mut BranchAndBound::default())
}

// ----------------------------------------------------------------------------
// --- OPTIMA -----------------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn two_items() {
    assert_eq!(solve("two_items.txt"), 20);
}
#[test]
fn three_items() {
    assert_eq!(solve("three_items.txt"), 25);
}
#[test]
fn twelve_items() {
    assert_eq!(solve("twelve_items.txt"), 457);
}
#[test]
fn eighteen_items() {
    assert_eq!(solve("eighteen_items.txt"), 661);
}
#[test]
fn negative_weights() {
    assert_eq!(solve("negative_weights.txt"), 551);
}
#[test]
fn no_constraints() {
    assert_eq!(solve("no_constraints.txt"), 11);
}
#[test]
fn best_first_agrees() {
    let mut solver = BranchAndBound::new(NodeOrder::BestFirst);
    assert_eq!(solve_with("eighteen_items.txt", &mut solver), 661);
}
#[test]
fn parallel_agrees() {
    for threads in [2, 4] {
        let mut solver = ParallelBranchAndBound::new(threads);
        assert_eq!(solve_with("eighteen_items.txt", &mut solver), 661);
        let mut solver = ParallelBranchAndBound::new(threads);
        assert_eq!(solve_with("negative_weights.txt", &mut solver), 551);
    }
}
#[test]
fn greedy_is_feasible_but_not_better() {
    for id in ["twelve_items.txt", "eighteen_items.txt"] {
        let natural    = solve_with(id, &mut GreedySolver::natural());
        let efficiency = solve_with(id, &mut GreedySolver::by_efficiency());
        assert!(natural <= solve(id));
        assert!(efficiency <= solve(id));
    }
}

// ----------------------------------------------------------------------------
// --- INCREMENTAL STATE ------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn incremental_bookkeeping_matches_the_recomputation() {
    let problem   = read_instance(locate("eighteen_items.txt")).unwrap();
    let mut state = SolutionState::new(&problem);
    let moves = [3, 7, 3, 11, 0, 17, 7, 5, 5, 2, 9, 0, 14];
    for (k, item) in moves.iter().copied().enumerate() {
        if k % 3 == 2 {
            state.remove(item).unwrap();
        } else {
            state.add(item).unwrap();
        }
        let objective = state.objective();
        let loads     = state.loads().to_vec();
        let (o, l)    = state.recompute_from_scratch();
        assert_eq!(objective, o);
        assert_eq!(loads, l);
    }
}
#[test]
fn out_of_range_indices_are_rejected() {
    let problem   = read_instance(locate("three_items.txt")).unwrap();
    let mut state = SolutionState::new(&problem);
    assert!(state.add(3).is_err());
    assert!(state.remove(3).is_err());
    assert!(state.can_add(3).is_err());
    assert!(state.is_selected(3).is_err());
    assert!(state.load(2).is_err());
    assert!(problem.capacity_of(2).is_err());
    assert!(problem.weight_of(0, 2).is_err());
    assert!(state.is_empty());
}

// ----------------------------------------------------------------------------
// --- HARNESS ----------------------------------------------------------------
// ----------------------------------------------------------------------------
#[test]
fn the_record_has_the_expected_format() {
    let config = RunConfigBuilder::default()
        .instance(locate("twelve_items.txt"))
        .time_budget(Duration::from_secs(10))
        .build()
        .unwrap();
    let report = run_with(&config, &mut std::io::sink()).unwrap();
    let record = Regex::new(r"^.+;-?\d+;\d+;[012]$").unwrap();
    assert!(record.is_match(&report.to_string()));
    assert!(report.to_string().ends_with(";0"));
    assert_eq!(457, report.objective);
}
#[test]
fn garbage_is_a_format_error() {
    let config = RunConfigBuilder::default()
        .instance(locate("garbage.txt"))
        .build()
        .unwrap();
    let err = run_with(&config, &mut std::io::sink()).unwrap_err();
    assert!(matches!(err, Error::Format(FormatError::ParseInt { .. })));
}

// ----------------------------------------------------------------------------
// --- BINARY -----------------------------------------------------------------
// ----------------------------------------------------------------------------
fn mkp() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mkp"))
}

#[test]
fn the_binary_prints_one_record() {
    let path   = locate("twelve_items.txt");
    let output = mkp().arg("-t").arg("5").arg(&path).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines  = stdout.lines().collect::<Vec<_>>();
    assert_eq!(1, lines.len());
    let expected = format!(r"^{};457;\d+;0$", regex::escape(&path.display().to_string()));
    assert!(Regex::new(&expected).unwrap().is_match(lines[0]));
}
#[test]
fn the_binary_writes_details_on_stderr_when_verbose() {
    let output = mkp().arg("-v").arg(locate("two_items.txt")).output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("MKP objective value: 20"));
    assert!(stderr.contains("******* Value of constraints ********"));
    assert!(stderr.contains("Constraint 0: 7 <= 10 / Remaining = 3"));
}
#[test]
fn the_binary_accepts_the_extra_solvers() {
    let output = mkp()
        .args(["--solver", "greedy", "-t", "5"])
        .arg(locate("two_items.txt"))
        .output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains(";10;"));

    let output = mkp()
        .args(["--threads", "3", "--order", "best-first", "-t", "5"])
        .arg(locate("eighteen_items.txt"))
        .output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains(";661;"));
}
#[test]
fn help_goes_to_stderr_and_does_not_solve_anything() {
    for flag in ["-help", "--help", "-h"] {
        let output = mkp().arg(flag).output().unwrap();
        assert_eq!(Some(0), output.status.code());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("Usage"));
        assert!(stderr.contains("--time"));
    }
}
#[test]
fn version_goes_to_stderr() {
    let output = mkp().arg("--version").output().unwrap();
    assert_eq!(Some(0), output.status.code());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr).unwrap().contains(env!("CARGO_PKG_VERSION")));
}
#[test]
fn a_missing_instance_argument_exits_with_one() {
    let output = mkp().output().unwrap();
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
}
#[test]
fn an_invalid_budget_exits_with_one() {
    let output = mkp().args(["-t", "soon"]).arg(locate("two_items.txt")).output().unwrap();
    assert_eq!(Some(1), output.status.code());
}
#[test]
fn an_unreadable_instance_exits_with_one() {
    let output = mkp().arg(locate("truncated.txt")).output().unwrap();
    assert_eq!(Some(1), output.status.code());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr).unwrap().contains("unexpected end of input"));
}
