mod tests_body;
mod tests_derived;
mod tests_init;
mod tests_members;
