mod end_to_end_test;
mod middleware_test;
