use crate::grading::{EvaluationEngine, Rubric};

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(Rubric::standard().expect("standard rubric builds"))
}

/// A thorough submission touching every category. Calibrated to saturate all
/// five raw-score ceilings.
pub(super) const RICH_SUBMISSION: &str = "\
Problem Statement: The objective of this assignment is to compute the average grade from values input by the user.
The program must validate every input value and check boundary conditions before processing begins.

Algorithm Overview: Our solution approach follows clear steps, and the process handles each edge case with care.

Flowchart: The diagram below shows the flow from start to end using decision and process symbols, with arrows marking direction.
Start -> Read input -> Validate value -> Decision: more values remain? -> Output the result -> End

Pseudocode:
BEGIN
    SET total = 0
    SET count = 0
    WHILE more values remain DO
        READ value
        IF value is valid THEN
            total = total + value
            count = count + 1
        END IF
    END WHILE
    average = total / count
    DISPLAY average
END

Documentation: // each comment explains the purpose of a step because clarity matters.
# This note describes how and why we calculate the average and update the count.";

/// A shorter, decent submission that lands mid-band in every category.
pub(super) const MODEST_SUBMISSION: &str = "\
The assignment asks for an algorithm that reads numbers and prints their sum.
If a value is negative the program must check it and stop reading input early.
Our flowchart begins at start, moves through a decision, and finishes at end.
Pseudocode for the solution:
start
    read number
    while number remains positive
        sum = sum + number
    print sum
end
A comment after each line explains what happens so another student can follow the logic easily.";

/// `n` keyword-free tokens, each longer than two characters, on one line.
/// At 29 tokens every word gate fails; at 30 the 30-word gates open.
pub(super) fn filler_words(n: usize) -> String {
    const WORDS: [&str; 30] = [
        "zebra", "quartz", "melon", "violet", "amber", "copper", "indigo", "maroon",
        "olive", "plum", "cedar", "birch", "aspen", "willow", "maple", "walnut",
        "hazel", "rowan", "alder", "poplar", "heron", "plover", "osprey", "kestrel",
        "merlin", "avocet", "dunlin", "godwit", "curlew", "sandpiper",
    ];
    WORDS[..n].join(" ")
}

/// Same prose with and without leading indentation on the middle lines.
pub(super) const INDENTED_SUBMISSION: &str = "\
The task requires an algorithm so the program reads every input number carefully.
Each value must pass validation before the loop accepts another entry from the user.
    check the value against the boundary
    while entries remain repeat the loop
    update the running output total
The method prints the final output once processing finishes and no numbers remain waiting.";

pub(super) fn flattened_submission() -> String {
    INDENTED_SUBMISSION.replace("\n    ", "\n")
}
