mod cli;
mod generation;
mod pipeline;
