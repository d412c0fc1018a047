/*!

This is the long-form manual for `apportionment` and `ecmap`.

## Apportionment methods

### `largestRemainder` (default)

The Hare largest-remainder method:

1. the quota is the total number of votes divided by the number of seats, rounded down;
2. each party receives one seat per full quota;
3. the seats left over go to the parties with the largest remainders, one
   seat each, in a ranking computed once.

With very few votes per seat, the rounded-down quota can award more seats
than available (for example 3 and 2 votes for 3 seats, quota 1). Each party
then receives its exact share `votes * seats / total votes`, rounded down,
and the seats left over go to the largest fractional parts. No party gets
more than one extra seat this way. When there are fewer votes than seats the
quota is 0, and the ranking of the votes is used again from the top until
all seats are given.

Example: votes `400000, 250000, 100000, 73000, 5000` for 5 seats. The quota
is 165600, the whole-quota seats are `2, 1, 0, 0, 0` and the remainders
`68800, 84400, 100000, 73000, 5000`. The two seats left go to the third and
the second party: `2, 2, 1, 0, 0`.

### `hagenbachBischoff`

The quota is the total number of votes divided by the number of seats plus
one. The seats left over are awarded one at a time to the party with the
largest remainder divided by its number of extra seats plus one. Equal
averages go to the party with fewer extra seats, so that two parties without
any vote share 5 seats as `3, 2`, as with `largestRemainder`. This is the
method used for list alliances (apparentments): see the `nested` module.

### Tie breaks

- `useInputOrder` (default): the party listed first wins.
- `random`: requires `randomSeed`. Tied parties are ordered by a SHA-256
  digest of the seed and of their name.

## Input formats

### `csv`

The vote database, one row per list:

```text
year,state,candidate,party,votes
2020,Georgia,"Biden, Joseph R. Jr",Democratic,2473633
2020,Georgia,"Trump, Donald J.",Republican,2461854
```

A header row is recognised when its first column contains `Header` or is `year`.
Lists whose candidate is `Invalid` (see `invalidLabel`) are not counted.
Each candidate is attached to its strongest list. Independent candidates are
reported as `Independent - <candidate>`.

### `json`

A result file, or a directory of result files laid out as
`<year>/<state>.json`. The votes are read and the seats are computed again:

```json
{
  "parties": [{"name": "Democratic", "votes": 2473633, "seats": 8}],
  "stats": {"name": "Georgia 2020", "total_seats": 16, "total_votes": 4935487}
}
```

The `seats` fields are only compared with the computed ones.

## Configuration

`ecmap` accepts a configuration file in JSON. All the fields are optional.

```json
{
  "outputSettings": {"outputDirectory": "data", "layout": "grid"},
  "source": {"provider": "csv", "filePath": "database.csv", "invalidLabel": "Invalid"},
  "rules": {"method": "largestRemainder", "tiebreakMode": "useInputOrder", "defaultElectors": 10},
  "layout": {"markerRadius": 10, "boundingBox": [0, 0, 900, 400], "smallCount": 4, "pairLimit": 9, "wideCap": 100}
}
```

Options passed on the command line override the configuration file.

 */
