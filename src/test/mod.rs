mod layouts;
mod pipeline;
