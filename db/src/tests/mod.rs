mod helpers;

mod assignment_tests;
mod grading_tests;
mod grievance_tests;
mod ledger_tests;
