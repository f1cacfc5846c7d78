mod dispatch;
mod literals;
mod support;
