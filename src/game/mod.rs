// Game code: the boy character and its behaviour states

pub mod boy;
