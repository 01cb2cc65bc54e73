mod pipeline_ops;
mod test_helpers;
