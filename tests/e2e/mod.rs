// End-to-end tests for the portfolio voice proxy
//
// Every test gets its own mock speech vendor (an axum server on an ephemeral
// port) and its own proxy instance pointed at it, so the process-wide voice
// cache starts empty for each test and tests can run in parallel.
//
// The mock records every call it receives, which lets tests assert on how
// many vendor requests a synthesis made and what was sent.
