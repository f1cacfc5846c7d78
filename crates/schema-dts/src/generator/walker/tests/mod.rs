mod fixed_point;
mod support;
