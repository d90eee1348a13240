//! Server-side token bucket script
//!
//! `KEYS[1]` is the bucket key, `ARGV` is `(now, rate, amount, idle_expiry_secs)`.
//! The arithmetic mirrors `BucketState::refill_and_take` line for line.
//! Numbers are stored with `%.17g` so they survive the round trip through a
//! Redis string without losing precision.

/// Lua source executed with `EVALSHA` (falling back to `EVAL` on a cold script cache)
pub const TOKEN_BUCKET_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local rate = tonumber(ARGV[2])
local amount = tonumber(ARGV[3])
local idle_expiry = tonumber(ARGV[4])

local state = redis.call('HMGET', key, 'tokens', 'last_refill')
local tokens = tonumber(state[1])
local last_refill = tonumber(state[2])
if tokens == nil or last_refill == nil then
  tokens = rate
  last_refill = now
end

local elapsed = math.max(0, now - last_refill)
local refill = elapsed * (rate / 60.0)
tokens = math.min(rate, tokens + refill)
last_refill = now

local allowed = 0
if tokens >= amount then
  tokens = tokens - amount
  allowed = 1
end

redis.call('HSET', key,
  'tokens', string.format('%.17g', tokens),
  'last_refill', string.format('%.17g', last_refill))
redis.call('EXPIRE', key, idle_expiry)
return allowed
"#;
