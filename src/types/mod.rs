// Public modules
pub mod chat_chunk;
pub mod chat_request;
pub mod choice_delta;
pub mod chunk_choice;
pub mod chunk_message;
pub mod completion_chunk;
pub mod fragment;
pub mod message_param;
pub mod message_role;

// Re-exports
pub use chat_chunk::ChatChunk;
pub use chat_request::ChatRequest;
pub use choice_delta::ChoiceDelta;
pub use chunk_choice::ChunkChoice;
pub use chunk_message::ChunkMessage;
pub use completion_chunk::CompletionChunk;
pub use fragment::Fragment;
pub use message_param::MessageParam;
pub use message_role::MessageRole;
