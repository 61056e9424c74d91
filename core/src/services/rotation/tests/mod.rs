mod gated;
