// End-to-end tests for the Platinum client
//
// Both provider APIs are simulated with wiremock servers started per test,
// and alert emails are captured by a recording sender, so tests run in
// parallel without touching the network or the process environment.

mod test_members;
